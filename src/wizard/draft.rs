//! Mutable booking draft owned by a single wizard
//!
//! Revisions track when the item list last changed and which revision the
//! current quote was computed from. A quote older than the items is stale;
//! it is kept (and flagged) until the customer asks for a recalculation.

use tranzr_common::{
    recalculate_quote, DetectedItem, ItemEdit, ItemList, JobRequest, MediaAsset, MediaList, PaymentMethod,
    Quote, QuoteParams, RouteInfo,
};

#[derive(Debug, Clone, Default)]
pub struct Draft {
    params: QuoteParams,
    media: MediaList,
    media_revision: u64,
    detected_at: Option<u64>,
    items: ItemList,
    items_revision: u64,
    route: RouteInfo,
    quote: Option<(Quote, u64)>,
    payment_method: Option<PaymentMethod>,
}

impl Draft {
    pub fn new(params: QuoteParams) -> Self {
        Self {
            params,
            ..Default::default()
        }
    }

    pub fn media(&self) -> &[MediaAsset] {
        self.media.as_slice()
    }

    pub fn items(&self) -> &[DetectedItem] {
        self.items.as_slice()
    }

    pub fn route(&self) -> &RouteInfo {
        &self.route
    }

    pub fn quote(&self) -> Option<&Quote> {
        self.quote.as_ref().map(|(quote, _)| quote)
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    /// Items changed since the quote was computed
    pub fn is_quote_stale(&self) -> bool {
        matches!(self.quote, Some((_, revision)) if revision != self.items_revision)
    }

    pub fn attach_media(&mut self, asset: MediaAsset) -> tranzr_common::Result<()> {
        self.media.attach(asset)?;
        self.media_revision += 1;
        Ok(())
    }

    pub fn remove_media(&mut self, id: u64) -> tranzr_common::Result<MediaAsset> {
        let removed = self.media.remove(id)?;
        self.media_revision += 1;
        Ok(removed)
    }

    /// Media changed since items were last detected
    pub fn needs_detection(&self) -> bool {
        self.detected_at != Some(self.media_revision)
    }

    /// Replace the item list with a detection result
    pub fn apply_detection(&mut self, items: Vec<DetectedItem>) {
        self.items.replace(items);
        self.items_revision += 1;
        self.detected_at = Some(self.media_revision);
    }

    pub fn add_item(&mut self, name: &str, dimensions: &str, volume: &str) -> u64 {
        let id = self.items.add(name, dimensions, volume);
        self.items_revision += 1;
        id
    }

    pub fn update_item(&mut self, id: u64, edit: ItemEdit) -> tranzr_common::Result<DetectedItem> {
        let item = self.items.update(id, edit)?.clone();
        self.items_revision += 1;
        Ok(item)
    }

    pub fn remove_item(&mut self, id: u64) -> tranzr_common::Result<DetectedItem> {
        let item = self.items.remove(id)?;
        self.items_revision += 1;
        Ok(item)
    }

    /// Blank postcodes are stored as None; route details are cleared
    pub fn set_postcodes(&mut self, origin: &str, destination: &str) {
        let normalize = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_uppercase())
        };
        self.route = RouteInfo {
            origin_postcode: normalize(origin),
            destination_postcode: normalize(destination),
            ..Default::default()
        };
    }

    pub fn set_route_details(&mut self, details: RouteInfo) {
        self.route.distance = details.distance;
        self.route.duration = details.duration;
        self.route.traffic_condition = details.traffic_condition;
    }

    pub fn recalculate_quote(&mut self) -> &Quote {
        let quote = recalculate_quote(self.items.as_slice(), &self.params);
        &self.quote.insert((quote, self.items_revision)).0
    }

    /// Current quote, computing the first one if none exists yet
    pub fn ensure_quote(&mut self) -> &Quote {
        let (items, params, revision) = (&self.items, &self.params, self.items_revision);
        &self
            .quote
            .get_or_insert_with(|| (recalculate_quote(items.as_slice(), params), revision))
            .0
    }

    pub fn select_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = Some(method);
    }

    /// Immutable request for submission; None until a payment method is chosen
    pub fn snapshot(&mut self) -> Option<JobRequest> {
        let payment_method = self.payment_method?;
        let quote = self.ensure_quote().clone();
        Some(JobRequest {
            items: self.items.as_slice().to_vec(),
            route: self.route.clone(),
            quote,
            payment_method,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tranzr_common::fixtures;

    #[test]
    fn test_quote_goes_stale_after_item_change() {
        let mut draft = Draft::new(QuoteParams::default());
        draft.apply_detection(fixtures::detected_items());
        assert!(!draft.is_quote_stale());

        assert_eq!(draft.recalculate_quote().total_price, 135);
        assert!(!draft.is_quote_stale());

        draft.remove_item(1).unwrap();
        assert!(draft.is_quote_stale());
        // stale quote is kept as is
        assert_eq!(draft.quote().unwrap().total_price, 135);

        let quote = draft.recalculate_quote().clone();
        assert!(!draft.is_quote_stale());
        // 0.75m³ → minimum hours
        assert_eq!(quote.estimated_hours, 2);
        assert_eq!(quote.total_price, 90);
    }

    #[test]
    fn test_failed_item_edit_keeps_quote_fresh() {
        let mut draft = Draft::new(QuoteParams::default());
        draft.apply_detection(fixtures::detected_items());
        draft.recalculate_quote();

        assert!(draft.remove_item(42).is_err());
        assert!(!draft.is_quote_stale());
    }

    #[test]
    fn test_detection_tracks_media_changes() {
        let mut draft = Draft::new(QuoteParams::default());
        assert!(draft.needs_detection());

        draft
            .attach_media(MediaAsset { id: 1, kind: tranzr_common::MediaKind::Image, uri: "u".into() })
            .unwrap();
        draft.apply_detection(fixtures::detected_items());
        assert!(!draft.needs_detection());

        draft.remove_media(1).unwrap();
        assert!(draft.needs_detection());
    }

    #[test]
    fn test_set_postcodes_normalizes() {
        let mut draft = Draft::new(QuoteParams::default());
        draft.set_postcodes(" e1 6an ", "");
        assert_eq!(draft.route().origin_postcode.as_deref(), Some("E1 6AN"));
        assert_eq!(draft.route().destination_postcode, None);
    }

    #[test]
    fn test_snapshot_requires_payment_method() {
        let mut draft = Draft::new(QuoteParams::default());
        assert!(draft.snapshot().is_none());

        draft.select_payment_method(PaymentMethod::BankTransfer);
        let request = draft.snapshot().unwrap();
        assert_eq!(request.payment_method, PaymentMethod::BankTransfer);
        assert_eq!(request.quote.estimated_hours, 2);
    }
}
