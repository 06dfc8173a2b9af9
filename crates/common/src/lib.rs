pub mod types;
pub mod utils;
pub mod signal;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn health_serializes_status() {
        let body = serde_json::to_value(types::Health::ok()).unwrap();
        assert_eq!(body, serde_json::json!({"status": "ok"}));
    }
}
