use std::time::Instant;

use once_cell::sync::Lazy;

use crate::format::time::format_duration;

static ENABLED: Lazy<bool> =
    Lazy::new(|| is_truthy(std::env::var("PKGMETA_PROFILE").ok().as_deref()));

pub(crate) fn is_truthy(value: Option<&str>) -> bool {
    matches!(value, Some("1") | Some("true") | Some("yes"))
}

pub fn enabled() -> bool {
    *ENABLED
}

pub struct ProfileSpan {
    name: &'static str,
    start: Instant,
}

impl ProfileSpan {
    pub fn new(name: &'static str) -> Option<Self> {
        enabled().then_some(Self {
            name,
            start: Instant::now(),
        })
    }
}

impl Drop for ProfileSpan {
    fn drop(&mut self) {
        let elapsed = format_duration(self.start.elapsed());
        tracing::info!(target: "pkgmeta::profile", span = self.name, %elapsed, "profile");
    }
}

pub fn span(name: &'static str) -> Option<ProfileSpan> {
    ProfileSpan::new(name)
}
