//! Query parameter types shared by more than one handler module.

use serde::Deserialize;
use storefront_core::error::CoreError;
use storefront_core::status::{DemoStatus, MessageKind, OrderStatus};

/// `?status=` filter on admin workflow listings.
#[derive(Debug, Default, Deserialize)]
pub struct StatusFilterParams {
    pub status: Option<String>,
}

impl StatusFilterParams {
    pub fn demo_status(&self) -> Result<Option<DemoStatus>, CoreError> {
        non_blank(self.status.as_deref()).map(DemoStatus::parse).transpose()
    }

    pub fn order_status(&self) -> Result<Option<OrderStatus>, CoreError> {
        non_blank(self.status.as_deref()).map(OrderStatus::parse).transpose()
    }
}

/// `?kind=` filter on message endpoints. Omitted means both kinds.
#[derive(Debug, Default, Deserialize)]
pub struct KindFilterParams {
    pub kind: Option<String>,
}

impl KindFilterParams {
    pub fn kind(&self) -> Result<Option<MessageKind>, CoreError> {
        non_blank(self.kind.as_deref()).map(MessageKind::parse).transpose()
    }
}

/// `?search=` on the app showcase.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn blank_status_means_no_filter() {
        let params = StatusFilterParams {
            status: Some("  ".into()),
        };
        assert_eq!(params.order_status().unwrap(), None);
    }

    #[test]
    fn unknown_status_is_a_validation_error() {
        let params = StatusFilterParams {
            status: Some("shipped".into()),
        };
        assert_matches!(params.order_status(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn kind_filter_parses() {
        let params = KindFilterParams {
            kind: Some("portfolio".into()),
        };
        assert_eq!(params.kind().unwrap(), Some(MessageKind::Portfolio));
    }
}
