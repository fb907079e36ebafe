use url::Url;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::job::Channel;

/// Shareable application URL for a published posting. Pure function of its
/// inputs: the same (base, channel, id) always yields the same URL.
pub fn build_public_link(base: &str, channel: Channel, job_id: Uuid) -> Result<Url> {
    let raw = format!(
        "{}/apply/{}/{}",
        base.trim_end_matches('/'),
        channel.as_str(),
        job_id
    );
    Url::parse(&raw).map_err(|e| Error::Config(format!("Invalid public base URL: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_shape_and_determinism() {
        let id = Uuid::new_v4();
        let a = build_public_link("https://jobs.example.com", Channel::Internal, id).unwrap();
        let b = build_public_link("https://jobs.example.com/", Channel::Internal, id).unwrap();

        assert_eq!(a, b);
        assert_eq!(
            a.as_str(),
            format!("https://jobs.example.com/apply/internal/{}", id)
        );
    }

    #[test]
    fn channel_namespaces_are_distinct() {
        let id = Uuid::new_v4();
        let internal = build_public_link("https://x.test", Channel::Internal, id).unwrap();
        let external = build_public_link("https://x.test", Channel::External, id).unwrap();
        assert_ne!(internal, external);
    }

    #[test]
    fn garbage_base_is_rejected() {
        assert!(build_public_link("not a url", Channel::External, Uuid::new_v4()).is_err());
    }
}
