use serde_json::Value;

pub fn emit_debug_payload(method: &str, request_url: &str, payload: Option<&Value>) {
    tracing::debug!(
        target: "dcon::api",
        method,
        url = request_url,
        "engine request payload:\n{}",
        format_payload(payload)
    );
}

pub fn emit_decode_error(request_url: &str, body: &[u8], error: &serde_json::Error) {
    tracing::warn!(
        target: "dcon::api",
        url = request_url,
        %error,
        "engine response did not decode:\n{}",
        String::from_utf8_lossy(body)
    );
}

fn format_payload(payload: Option<&Value>) -> String {
    match payload {
        Some(payload) => serde_json::to_string_pretty(payload)
            .unwrap_or_else(|_| "<payload serialization error>".to_string()),
        None => "<empty>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn format_payload_pretty_prints_batches() {
        let payload = json!(["mkdisk -size=10", "rep"]);
        assert_eq!(
            format_payload(Some(&payload)),
            "[\n  \"mkdisk -size=10\",\n  \"rep\"\n]"
        );
        assert_eq!(format_payload(None), "<empty>");
    }
}
