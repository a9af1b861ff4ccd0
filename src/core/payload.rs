use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{GiftTheme, ThemeSet};

/// Shape of a recommendation payload, decided once per response body
#[derive(Debug, Clone, PartialEq)]
pub enum ApiPayload {
    /// `{ "status": "loading" }`: the service is still working
    Loading,
    /// Carries its own `isMockData` flag and is passed through unchanged
    Flagged(ThemeSet),
    /// `{ "themes": [...] }` with at least one theme
    Themes(Vec<GiftTheme>),
    /// A non-empty bare array of themes
    Bare(Vec<GiftTheme>),
    /// Anything else, including empty lists and malformed themes
    Unrecognized,
}

#[derive(Deserialize)]
struct LoadingStatus {
    status: String,
}

#[derive(Deserialize)]
struct ThemesWrapper {
    themes: Vec<GiftTheme>,
    #[serde(rename = "isMockData", default)]
    is_mock_data: Option<bool>,
}

/// Classify a decoded JSON body
pub fn decode_payload(value: &Value) -> ApiPayload {
    if let Ok(LoadingStatus { status }) = LoadingStatus::deserialize(value) {
        if status == "loading" {
            return ApiPayload::Loading;
        }
    }

    if let Ok(wrapper) = ThemesWrapper::deserialize(value) {
        return match wrapper.is_mock_data {
            Some(is_mock_data) => ApiPayload::Flagged(ThemeSet {
                themes: wrapper.themes,
                is_mock_data,
            }),
            None if !wrapper.themes.is_empty() => ApiPayload::Themes(wrapper.themes),
            None => ApiPayload::Unrecognized,
        };
    }

    match Vec::<GiftTheme>::deserialize(value) {
        Ok(themes) if !themes.is_empty() => ApiPayload::Bare(themes),
        _ => ApiPayload::Unrecognized,
    }
}

impl ApiPayload {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiPayload::Loading => "loading",
            ApiPayload::Flagged(_) => "flagged",
            ApiPayload::Themes(_) => "themes",
            ApiPayload::Bare(_) => "bare_array",
            ApiPayload::Unrecognized => "unrecognized",
        }
    }

    /// The usable theme list, if this payload has one
    pub fn into_theme_set(self) -> Option<ThemeSet> {
        match self {
            ApiPayload::Flagged(set) => Some(set),
            ApiPayload::Themes(themes) | ApiPayload::Bare(themes) => Some(ThemeSet::live(themes)),
            ApiPayload::Loading | ApiPayload::Unrecognized => None,
        }
    }
}

/// Body relayed by the proxy after normalization
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RelayBody {
    Themes(ThemeSet),
    Passthrough(Value),
}

/// Wrap bare arrays as `{ themes }`; anything unusable is relayed as-is
pub fn normalize_upstream(value: Value) -> RelayBody {
    match decode_payload(&value).into_theme_set() {
        Some(set) => RelayBody::Themes(set),
        None => RelayBody::Passthrough(value),
    }
}
