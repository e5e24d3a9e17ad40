/// Booking page that lists every location together with its first open slot.
pub const DEFAULT_PAGE_URL: &str = "https://telegov.njportal.com/njmvc/AppointmentWizard/12";

#[derive(Clone)]
pub struct AppConfig {
    pub page_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub notify_timeout_secs: u32,
    pub webhook_url: Option<String>,
}

impl AppConfig {
    /// Booking page for a single location, e.g. `.../AppointmentWizard/12/124`.
    #[must_use]
    pub fn location_page_url(&self, location_id: i64) -> String {
        format!("{}/{location_id}", self.page_url.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("page_url", &self.page_url)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("notify_timeout_secs", &self.notify_timeout_secs)
            .field(
                "webhook_url",
                &self.webhook_url.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
