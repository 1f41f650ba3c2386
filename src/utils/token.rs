use rand::{distributions::Alphanumeric, thread_rng, Rng};

pub fn generate_access_token(length: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Record ids follow the `{prefix}_{suffix}` convention used across the
/// store ("cand_…", "msg_…", "evt_…", "tmpl_…", "log_…").
pub fn new_id(prefix: &str) -> String {
    let suffix: String = thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect();
    format!("{}_{}", prefix, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_carry_prefix_and_suffix() {
        let id = new_id("cand");
        assert!(id.starts_with("cand_"));
        assert_eq!(id.len(), "cand_".len() + 8);
    }

    #[test]
    fn access_tokens_have_requested_length() {
        assert_eq!(generate_access_token(32).len(), 32);
    }
}
