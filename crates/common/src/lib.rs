//! Shared building blocks for the advertisement service crates.

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health::healthy();
        assert_eq!(h.status, "healthy");
    }

    #[test]
    fn message_serializes_as_object() {
        let m = types::Message::new("Advertisement Service API");
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v["message"], "Advertisement Service API");
    }
}
