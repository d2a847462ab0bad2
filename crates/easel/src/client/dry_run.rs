use log::info;

use easel_core::command::{Frame, Shape, Sticky, Text};

use super::{BoardClient, ClientError, ItemId};
use crate::config::PaletteConfig;

/// [`BoardClient`] that creates nothing.
///
/// Each call is logged and answered with a sequential `dry-N` identifier.
/// Sticky note colors still go through the palette, so a strict palette
/// reports the same failures a real run would.
#[derive(Debug, Default)]
pub struct DryRunClient {
    palette: PaletteConfig,
    issued: u64,
}

impl DryRunClient {
    pub fn new(palette: PaletteConfig) -> Self {
        Self { palette, issued: 0 }
    }

    /// Number of identifiers handed out so far.
    pub fn issued(&self) -> u64 {
        self.issued
    }

    fn next_id(&mut self) -> ItemId {
        self.issued += 1;
        ItemId::new(format!("dry-{}", self.issued))
    }
}

impl BoardClient for DryRunClient {
    fn create_frame(&mut self, frame: &Frame) -> Result<ItemId, ClientError> {
        let id = self.next_id();
        info!(id = id.as_str(); "Would create frame '{}'", frame.title());
        Ok(id)
    }

    fn create_shape(&mut self, shape: &Shape) -> Result<ItemId, ClientError> {
        let id = self.next_id();
        info!(id = id.as_str(), shape = shape.shape(); "Would create shape '{}'", shape.name());
        Ok(id)
    }

    fn create_sticky(&mut self, sticky: &Sticky) -> Result<ItemId, ClientError> {
        let Some(color) = self.palette.normalize(sticky.color()) else {
            return Err(ClientError::InvalidColor {
                color: sticky.color().to_string(),
                allowed: self.palette.allowed().to_vec(),
            });
        };
        let color = color.to_string();
        let id = self.next_id();
        info!(id = id.as_str(), color = color.as_str(); "Would create sticky note");
        Ok(id)
    }

    fn create_text(&mut self, text: &Text) -> Result<ItemId, ClientError> {
        let id = self.next_id();
        info!(id = id.as_str(); "Would create text '{}'", text.content());
        Ok(id)
    }

    fn create_connector(
        &mut self,
        start: &ItemId,
        end: &ItemId,
        label: &str,
    ) -> Result<ItemId, ClientError> {
        let id = self.next_id();
        info!(
            id = id.as_str(),
            start = start.as_str(),
            end = end.as_str(),
            label = label;
            "Would create connector"
        );
        Ok(id)
    }
}
