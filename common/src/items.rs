//! Draft-owned collections: detected items and uploaded media
//!
//! Both keep their ids unique. Item ids are allocated here (max + 1),
//! media ids come from the upload service and are checked on attach.

use crate::error::{Error, Result};
use crate::model::{DetectedItem, MediaAsset};
use crate::quote::volume_from_dimensions;

/// Field changes for an existing item; None leaves the field as is
#[derive(Debug, Clone, Default)]
pub struct ItemEdit {
    pub name: Option<String>,
    pub dimensions: Option<String>,
    pub volume: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemList {
    items: Vec<DetectedItem>,
}

impl ItemList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list (detection result). Duplicate ids keep the first entry.
    pub fn replace(&mut self, items: Vec<DetectedItem>) {
        self.items.clear();
        for item in items {
            if !self.items.iter().any(|i| i.id == item.id) {
                self.items.push(item);
            }
        }
    }

    pub fn as_slice(&self) -> &[DetectedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&DetectedItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Next id: strictly greater than the current maximum, 1 when empty
    pub fn next_id(&self) -> u64 {
        self.items.iter().map(|i| i.id).max().map_or(1, |max| max + 1)
    }

    /// Add an item and return its id. A blank volume is derived from the dimensions.
    pub fn add(&mut self, name: &str, dimensions: &str, volume: &str) -> u64 {
        let id = self.next_id();
        let volume = if volume.trim().is_empty() {
            volume_from_dimensions(dimensions).unwrap_or_default()
        } else {
            volume.trim().to_string()
        };

        self.items.push(DetectedItem {
            id,
            name: name.trim().to_string(),
            dimensions: dimensions.trim().to_string(),
            volume,
        });
        id
    }

    pub fn update(&mut self, id: u64, edit: ItemEdit) -> Result<&DetectedItem> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(Error::ItemNotFound(id))?;

        if let Some(name) = edit.name {
            item.name = name.trim().to_string();
        }
        if let Some(dimensions) = edit.dimensions {
            item.dimensions = dimensions.trim().to_string();
        }
        if let Some(volume) = edit.volume {
            item.volume = volume.trim().to_string();
        }
        Ok(item)
    }

    /// Remove exactly the item with this id
    pub fn remove(&mut self, id: u64) -> Result<DetectedItem> {
        let pos = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or(Error::ItemNotFound(id))?;
        Ok(self.items.remove(pos))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaList {
    assets: Vec<MediaAsset>,
}

impl MediaList {
    pub fn as_slice(&self) -> &[MediaAsset] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn attach(&mut self, asset: MediaAsset) -> Result<()> {
        if self.assets.iter().any(|a| a.id == asset.id) {
            return Err(Error::DuplicateMedia(asset.id));
        }
        self.assets.push(asset);
        Ok(())
    }

    pub fn remove(&mut self, id: u64) -> Result<MediaAsset> {
        let pos = self
            .assets
            .iter()
            .position(|a| a.id == id)
            .ok_or(Error::MediaNotFound(id))?;
        Ok(self.assets.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MediaKind;

    #[test]
    fn test_first_id_is_one() {
        let mut items = ItemList::new();
        assert_eq!(items.add("Sofa", "200x90x85cm", "1.53m³"), 1);
    }

    #[test]
    fn test_next_id_exceeds_max() {
        let mut items = ItemList::new();
        items.replace(vec![
            DetectedItem { id: 7, name: "Desk".into(), ..Default::default() },
            DetectedItem { id: 3, name: "Chair".into(), ..Default::default() },
        ]);
        assert_eq!(items.add("Lamp", "", "0.1m³"), 8);

        // removing the max does not reuse lower gaps
        items.remove(8).unwrap();
        items.remove(3).unwrap();
        assert_eq!(items.next_id(), 8);
    }

    #[test]
    fn test_add_derives_volume_from_dimensions() {
        let mut items = ItemList::new();
        let id = items.add("Bookshelf", "80x30x180cm", "  ");
        assert_eq!(items.get(id).unwrap().volume, "0.43m³");

        let id = items.add("Box", "unknown", "");
        assert_eq!(items.get(id).unwrap().volume, "");
    }

    #[test]
    fn test_remove_exactly_one() {
        let mut items = ItemList::new();
        items.add("Sofa", "", "1.53m³");
        items.add("Coffee Table", "", "0.32m³");
        items.add("Bookshelf", "", "0.43m³");

        let removed = items.remove(2).unwrap();
        assert_eq!(removed.name, "Coffee Table");
        let ids: Vec<u64> = items.as_slice().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 3]);

        assert!(matches!(items.remove(2), Err(Error::ItemNotFound(2))));
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_update_item() {
        let mut items = ItemList::new();
        let id = items.add("Sofa", "200x90x85cm", "1.53m³");

        let updated = items
            .update(id, ItemEdit { volume: Some("2.0m³".into()), ..Default::default() })
            .unwrap();
        assert_eq!(updated.volume, "2.0m³");
        assert_eq!(updated.name, "Sofa");

        assert!(items.update(99, ItemEdit::default()).is_err());
    }

    #[test]
    fn test_replace_drops_duplicate_ids() {
        let mut items = ItemList::new();
        items.replace(vec![
            DetectedItem { id: 1, name: "A".into(), ..Default::default() },
            DetectedItem { id: 1, name: "B".into(), ..Default::default() },
        ]);
        assert_eq!(items.len(), 1);
        assert_eq!(items.get(1).unwrap().name, "A");
    }

    #[test]
    fn test_media_attach_and_remove() {
        let mut media = MediaList::default();
        let asset = MediaAsset { id: 10, kind: MediaKind::Image, uri: "a".into() };

        media.attach(asset.clone()).unwrap();
        assert!(matches!(media.attach(asset), Err(Error::DuplicateMedia(10))));
        assert_eq!(media.len(), 1);

        assert!(media.remove(11).is_err());
        assert_eq!(media.remove(10).unwrap().uri, "a");
        assert!(media.is_empty());
    }
}
