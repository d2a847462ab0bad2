use log::{debug, trace};
use reqwest::{StatusCode, blocking::Client};
use serde::Deserialize;
use serde_json::{Value, json};

use easel_core::command::{Frame, Shape, Sticky, Text};

use super::{BoardClient, ClientError, Credentials, Endpoint, ItemId};
use crate::config::{AppConfig, PaletteConfig, StyleConfig};

/// Service error code for a rejected field value.
const INVALID_VALUE_CODE: &str = "2.0703";

/// Field that carries the sticky note color.
const FILL_COLOR_FIELD: &str = "style.fillColor";

/// Longest slice of an unparsed error body kept in error details.
const MAX_DETAILS_CHARS: usize = 200;

/// [`BoardClient`] backed by the Miro REST API.
///
/// Every create call is a single blocking `POST` to
/// `{base_url}/boards/{board_id}/{endpoint}`. A `201 Created` response with an
/// `id` is success; everything else is turned into a [`ClientError`].
pub struct MiroClient {
    http: Client,
    credentials: Credentials,
    base_url: String,
    palette: PaletteConfig,
    style: StyleConfig,
}

impl MiroClient {
    /// Creates a client for the board named in `credentials`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialised.
    pub fn new(credentials: Credentials, config: &AppConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.api().timeout()).build()?;

        Ok(Self {
            http,
            credentials,
            base_url: config.api().base_url().to_string(),
            palette: config.palette().clone(),
            style: config.style().clone(),
        })
    }

    /// Returns the credentials the client authenticates with.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!(
            "{}/boards/{}/{}",
            self.base_url,
            self.credentials.board_id(),
            endpoint
        )
    }

    fn post(&self, endpoint: Endpoint, body: &Value) -> Result<ItemId, ClientError> {
        let url = self.url(endpoint);
        debug!(endpoint = endpoint.as_str(); "POST {url}");
        trace!(endpoint = endpoint.as_str(); "Request body: {body}");

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.credentials.token())
            .json(body)
            .send()
            .map_err(|err| transport_error(endpoint, &err))?;

        let status = response.status();
        if status == StatusCode::CREATED {
            let created: Created = response
                .json()
                .map_err(|err| transport_error(endpoint, &err))?;
            return created
                .id
                .filter(|id| !id.is_empty())
                .map(ItemId::new)
                .ok_or(ClientError::MissingId { endpoint });
        }

        let text = response.text().unwrap_or_default();
        Err(classify_failure(
            endpoint,
            status.as_u16(),
            &text,
            self.palette.allowed(),
        ))
    }
}

impl BoardClient for MiroClient {
    fn create_frame(&mut self, frame: &Frame) -> Result<ItemId, ClientError> {
        self.post(Endpoint::Frames, &frame_body(frame, &self.style))
    }

    fn create_shape(&mut self, shape: &Shape) -> Result<ItemId, ClientError> {
        self.post(Endpoint::Shapes, &shape_body(shape, &self.style))
    }

    fn create_sticky(&mut self, sticky: &Sticky) -> Result<ItemId, ClientError> {
        let Some(color) = self.palette.normalize(sticky.color()) else {
            return Err(ClientError::InvalidColor {
                color: sticky.color().to_string(),
                allowed: self.palette.allowed().to_vec(),
            });
        };
        debug!(color = sticky.color(), name = color; "Mapped sticky note color");

        self.post(
            Endpoint::StickyNotes,
            &sticky_body(sticky, color, &self.style),
        )
    }

    fn create_text(&mut self, text: &Text) -> Result<ItemId, ClientError> {
        self.post(Endpoint::Texts, &text_body(text, &self.style))
    }

    fn create_connector(
        &mut self,
        start: &ItemId,
        end: &ItemId,
        label: &str,
    ) -> Result<ItemId, ClientError> {
        self.post(
            Endpoint::Connectors,
            &connector_body(start, end, label, &self.style),
        )
    }
}

#[derive(Debug, Deserialize)]
struct Created {
    #[serde(default)]
    id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiErrorBody {
    code: Option<String>,
    message: Option<String>,
    context: ErrorContext,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorContext {
    fields: Vec<FieldError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FieldError {
    field: String,
    message: String,
}

fn transport_error(endpoint: Endpoint, err: &reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout { endpoint }
    } else {
        ClientError::Transport {
            endpoint,
            message: err.to_string(),
        }
    }
}

/// Turns a non-201 response into a [`ClientError`].
fn classify_failure(
    endpoint: Endpoint,
    status: u16,
    body: &str,
    allowed: &[String],
) -> ClientError {
    let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) else {
        return ClientError::Rejected {
            endpoint,
            status,
            details: body.chars().take(MAX_DETAILS_CHARS).collect(),
        };
    };

    if endpoint == Endpoint::StickyNotes && parsed.code.as_deref() == Some(INVALID_VALUE_CODE) {
        let color = parsed
            .context
            .fields
            .iter()
            .filter(|field| field.field == FILL_COLOR_FIELD)
            .find_map(|field| bracketed(&field.message));
        if let Some(color) = color {
            return ClientError::InvalidColor {
                color: color.to_string(),
                allowed: allowed.to_vec(),
            };
        }
    }

    ClientError::Rejected {
        endpoint,
        status,
        details: parsed
            .message
            .unwrap_or_else(|| body.chars().take(MAX_DETAILS_CHARS).collect()),
    }
}

/// Extracts the value in `Unexpected value [#E0E0E0]` style messages.
fn bracketed(message: &str) -> Option<&str> {
    let start = message.find('[')? + 1;
    let len = message[start..].find(']')?;
    let value = &message[start..start + len];
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c == '#' || c == '_' || c.is_alphanumeric());
    valid.then_some(value)
}

fn frame_body(frame: &Frame, style: &StyleConfig) -> Value {
    json!({
        "data": { "title": frame.title(), "type": "freeform" },
        "style": { "fillColor": style.frame_fill() },
        "position": frame.position(),
        "geometry": frame.size(),
    })
}

fn shape_body(shape: &Shape, style: &StyleConfig) -> Value {
    json!({
        "data": { "shape": shape.shape(), "content": shape.name() },
        "style": {
            "fillColor": shape.color(),
            "fontSize": style.font_size(),
            "textAlign": "center",
            "textAlignVertical": "middle",
            "borderColor": style.border_color(),
            "borderWidth": style.border_width(),
            "color": style.label_color_for(shape.color()),
        },
        "position": shape.position(),
        "geometry": shape.size(),
    })
}

fn sticky_body(sticky: &Sticky, color: &str, style: &StyleConfig) -> Value {
    json!({
        "data": { "content": sticky.text(), "shape": "square" },
        "style": {
            "fillColor": color,
            "textAlign": "left",
            "textAlignVertical": "top",
        },
        "position": sticky.position(),
        "geometry": { "width": style.sticky_width() },
    })
}

fn text_body(text: &Text, style: &StyleConfig) -> Value {
    json!({
        "data": { "content": text.content() },
        "style": { "fontSize": text.font_size(), "color": style.text_color() },
        "position": text.position(),
    })
}

fn connector_body(start: &ItemId, end: &ItemId, label: &str, style: &StyleConfig) -> Value {
    let mut body = json!({
        "startItem": { "id": start.as_str() },
        "endItem": { "id": end.as_str() },
        "style": {
            "strokeColor": style.connector_color(),
            "strokeWidth": style.connector_width(),
            "endStrokeCap": style.connector_end_cap(),
        },
    });
    if !label.is_empty() {
        body["captions"] = json!([{
            "content": label,
            "position": 0.5,
            "textAlignVertical": "middle",
        }]);
    }
    body
}

#[cfg(test)]
mod tests {
    use easel_core::geometry::{Point, Size};

    use super::*;

    fn allowed() -> Vec<String> {
        PaletteConfig::default().allowed().to_vec()
    }

    #[test]
    fn test_frame_body() {
        let frame = Frame::new("Plan", Point::new(0.0, -10.5), Size::new(800.0, 600.0));

        assert_eq!(
            frame_body(&frame, &StyleConfig::default()),
            json!({
                "data": { "title": "Plan", "type": "freeform" },
                "style": { "fillColor": "#ffffff" },
                "position": { "x": 0.0, "y": -10.5 },
                "geometry": { "width": 800.0, "height": 600.0 },
            })
        );
    }

    #[test]
    fn test_shape_body_label_color_follows_fill() {
        let style = StyleConfig::default();
        let blue = Shape::new("Box1", Point::new(10.0, 20.0), Size::new(100.0, 50.0));
        let gold = blue.clone().with_color("#FFD700").with_shape("circle");

        let blue_body = shape_body(&blue, &style);
        assert_eq!(blue_body["data"]["content"], "Box1");
        assert_eq!(blue_body["data"]["shape"], "rectangle");
        assert_eq!(blue_body["style"]["fillColor"], "#4169E1");
        assert_eq!(blue_body["style"]["color"], "#ffffff");
        assert_eq!(blue_body["style"]["borderWidth"], "2");

        let gold_body = shape_body(&gold, &style);
        assert_eq!(gold_body["data"]["shape"], "circle");
        assert_eq!(gold_body["style"]["color"], "#000000");
    }

    #[test]
    fn test_sticky_and_text_bodies() {
        let style = StyleConfig::default();
        let sticky = Sticky::new("Note", Point::new(5.0, 5.0)).with_color("#E0E0E0");
        let text = Text::new("Title", Point::new(1.0, 2.0)).with_font_size("24");

        let sticky = sticky_body(&sticky, "gray", &style);
        assert_eq!(sticky["style"]["fillColor"], "gray");
        assert_eq!(sticky["data"]["shape"], "square");
        assert_eq!(sticky["geometry"], json!({ "width": 200.0 }));
        assert_eq!(sticky["position"], json!({ "x": 5.0, "y": 5.0 }));

        let text = text_body(&text, &style);
        assert_eq!(text["style"], json!({ "fontSize": "24", "color": "#000000" }));
        assert!(text.get("geometry").is_none());
        assert_eq!(text["position"], json!({ "x": 1.0, "y": 2.0 }));
    }

    #[test]
    fn test_connector_caption_only_with_label() {
        let style = StyleConfig::default();
        let start = ItemId::new("1");
        let end = ItemId::new("2");

        let bare = connector_body(&start, &end, "", &style);
        assert!(bare.get("captions").is_none());
        assert_eq!(bare["startItem"]["id"], "1");
        assert_eq!(bare["style"]["endStrokeCap"], "stealth");

        let labelled = connector_body(&start, &end, "calls", &style);
        assert_eq!(labelled["captions"][0]["content"], "calls");
        assert_eq!(labelled["captions"][0]["position"], 0.5);
    }

    #[test]
    fn test_classify_invalid_sticky_color() {
        let body = r##"{
            "type": "error",
            "code": "2.0703",
            "message": "Invalid parameters",
            "context": {
                "fields": [
                    { "field": "style.fillColor", "message": "Unexpected value [#E0E0E1]" }
                ]
            }
        }"##;

        let err = classify_failure(Endpoint::StickyNotes, 400, body, &allowed());

        match err {
            ClientError::InvalidColor { color, allowed } => {
                assert_eq!(color, "#E0E0E1");
                assert_eq!(allowed.len(), 16);
            }
            other => panic!("expected InvalidColor, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_same_code_on_other_endpoint_is_rejected() {
        let body = r#"{"code": "2.0703", "message": "Invalid parameters"}"#;

        let err = classify_failure(Endpoint::Shapes, 400, body, &allowed());

        assert!(matches!(
            err,
            ClientError::Rejected { status: 400, ref details, .. } if details == "Invalid parameters"
        ));
    }

    #[test]
    fn test_classify_unparsable_body_is_truncated() {
        let body = "x".repeat(500);

        let err = classify_failure(Endpoint::Frames, 502, &body, &allowed());

        let ClientError::Rejected { details, status, .. } = err else {
            panic!("expected Rejected");
        };
        assert_eq!(status, 502);
        assert_eq!(details.len(), MAX_DETAILS_CHARS);
    }

    #[test]
    fn test_bracketed() {
        assert_eq!(bracketed("Unexpected value [#E0E0E0]"), Some("#E0E0E0"));
        assert_eq!(bracketed("Unexpected value [light_blue] here"), Some("light_blue"));
        assert_eq!(bracketed("Unexpected value []"), None);
        assert_eq!(bracketed("no brackets"), None);
        assert_eq!(bracketed("bad [a b]"), None);
    }

    #[test]
    fn test_strict_palette_rejects_before_request() {
        let config = AppConfig::new(
            Default::default(),
            PaletteConfig::default().with_strict(true),
            Default::default(),
            Default::default(),
        );
        let mut client = MiroClient::new(Credentials::new("token", "board"), &config).unwrap();
        let sticky = Sticky::new("Note", Point::new(0.0, 0.0)).with_color("#010203");

        let err = client.create_sticky(&sticky).unwrap_err();

        assert!(matches!(err, ClientError::InvalidColor { ref color, .. } if color == "#010203"));
    }
}
