//! Order status display mapping.

use serde::{Deserialize, Serialize};

/// The known order status codes used for display mapping.
///
/// [`Order::status`](crate::types::Order::status) stays free text - the
/// fulfillment API occasionally grows new codes and the normalizer must not
/// reject them. UI consumers map the code through this enum to share one
/// label table, falling back to the raw code when [`from_code`] returns
/// `None`.
///
/// [`from_code`]: OrderStatus::from_code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    /// Map a raw status code, case-insensitively. Unknown codes yield `None`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "processing" => Some(Self::Processing),
            "shipped" => Some(Self::Shipped),
            "delivered" => Some(Self::Delivered),
            "cancelled" => Some(Self::Cancelled),
            "refunded" => Some(Self::Refunded),
            _ => None,
        }
    }

    /// Wire-format code for this status.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
        }
    }

    /// Customer-facing label, in the deployment language of the source
    /// system (Brazilian Portuguese).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pendente",
            Self::Processing => "Processando",
            Self::Shipped => "Enviado",
            Self::Delivered => "Entregue",
            Self::Cancelled => "Cancelado",
            Self::Refunded => "Reembolsado",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| format!("unknown order status: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_case_insensitive() {
        assert_eq!(OrderStatus::from_code("SHIPPED"), Some(OrderStatus::Shipped));
        assert_eq!(OrderStatus::from_code(" delivered "), Some(OrderStatus::Delivered));
    }

    #[test]
    fn test_from_code_unknown() {
        assert_eq!(OrderStatus::from_code("backordered"), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(OrderStatus::Shipped.label(), "Enviado");
        assert_eq!(OrderStatus::Refunded.label(), "Reembolsado");
    }

    #[test]
    fn test_display_round_trip() {
        let status: OrderStatus = OrderStatus::Processing.to_string().parse().unwrap_or(OrderStatus::Pending);
        assert_eq!(status, OrderStatus::Processing);
    }
}
