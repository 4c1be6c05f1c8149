//! # Root Impersonation
//!
//! An adversary presents keys close to the Aleph key, or any key at all
//! before genesis is loaded, hoping to be treated as root.

#[cfg(test)]
mod tests {
    use crate::{anchored_service, network_from, service_on, TEST_ALEPH_KEY};
    use pr_identity::{constant_time_compare, IdentityApi};

    #[test]
    fn test_attack_prefix_and_suffix_keys() {
        let service = anchored_service(200);
        assert!(service.is_root(TEST_ALEPH_KEY));

        let prefix = &TEST_ALEPH_KEY[..TEST_ALEPH_KEY.len() - 1];
        assert!(!service.is_root(prefix));
        assert!(!service.is_root(&format!("{TEST_ALEPH_KEY}0")));
        assert!(!service.is_root(&TEST_ALEPH_KEY.to_uppercase()));
        assert!(!service.is_root(""));
    }

    #[test]
    fn test_attack_root_claim_before_genesis() {
        let service = service_on(network_from("{}"), 201, true);
        assert!(service.is_bootstrap());
        assert!(!service.is_root(TEST_ALEPH_KEY));
        assert!(!service.is_root(""));
    }

    #[test]
    fn test_attack_generated_identity_is_never_root() {
        let service = anchored_service(202);
        let bundle = service.generate_identity("mallory", None).unwrap();
        assert!(!service.is_root(&bundle.classical.public_key));
    }

    #[test]
    fn test_comparison_pads_length_difference() {
        // Zero padding on one side and 0xFF on the other keeps a short key
        // from matching a longer key that ends in NULs.
        assert!(!constant_time_compare("key", "key\0"));
        assert!(!constant_time_compare("key\u{FF}", "key"));
    }
}
