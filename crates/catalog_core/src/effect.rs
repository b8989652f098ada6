/// Side effects requested by [`crate::update`]; executed by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace the current URL's query string; not a navigation.
    ReplaceQuery { query: String },
    /// Hand the selected record to the playback collaborator.
    OpenPlayback(PlaybackRequest),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackRequest {
    pub record_id: String,
    pub title: String,
    pub watch_url: String,
}
