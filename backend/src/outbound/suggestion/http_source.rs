//! Reqwest-backed suggestion source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::{SuggestionRequestDto, SuggestionResponseDto};
use crate::domain::ports::{SuggestionSource, SuggestionSourceError};
use crate::domain::{CalendarDay, OwnerId, Suggestion};

const DEFAULT_LOCALE: &str = "en";

/// Posts `{ownerId, date, locale}` to one endpoint and expects
/// `{title, reason}` back.
pub struct HttpSuggestionSource {
    client: Client,
    endpoint: Url,
    locale: String,
}

impl HttpSuggestionSource {
    /// Source for `endpoint` with a whole-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            locale: DEFAULT_LOCALE.to_owned(),
        })
    }

    /// Override the locale sent with each request.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }
}

#[async_trait]
impl SuggestionSource for HttpSuggestionSource {
    async fn suggest(
        &self,
        owner: &OwnerId,
        day: CalendarDay,
    ) -> Result<Suggestion, SuggestionSourceError> {
        let payload = SuggestionRequestDto {
            owner_id: owner.as_str(),
            date: day.to_string(),
            locale: &self.locale,
        };
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|err| SuggestionSourceError::transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status_error(status));
        }
        let body = response
            .bytes()
            .await
            .map_err(|err| SuggestionSourceError::transport(err.to_string()))?;
        parse_suggestion(body.as_ref())
    }
}

fn map_status_error(status: StatusCode) -> SuggestionSourceError {
    SuggestionSourceError::status(status.as_u16())
}

fn parse_suggestion(body: &[u8]) -> Result<Suggestion, SuggestionSourceError> {
    let decoded: SuggestionResponseDto = serde_json::from_slice(body).map_err(|err| {
        SuggestionSourceError::decode(format!("invalid suggestion JSON payload: {err}"))
    })?;
    decoded
        .into_domain()
        .ok_or_else(|| SuggestionSourceError::decode("suggestion missing title or reason"))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn decodes_complete_payload() {
        let suggestion =
            parse_suggestion(br#"{"title":" Stretch ","reason":"Loosens the back."}"#)
                .expect("payload decodes");
        assert_eq!(suggestion, Suggestion::new("Stretch", "Loosens the back."));
    }

    #[rstest]
    #[case::missing_reason(br#"{"title":"Stretch"}"#.as_slice())]
    #[case::blank_title(br#"{"title":"  ","reason":"why"}"#.as_slice())]
    #[case::not_json(b"Stretch today".as_slice())]
    fn incomplete_payloads_are_decode_errors(#[case] body: &[u8]) {
        assert!(matches!(
            parse_suggestion(body),
            Err(SuggestionSourceError::Decode { .. })
        ));
    }

    #[rstest]
    fn statuses_keep_their_code() {
        assert_eq!(
            map_status_error(StatusCode::BAD_GATEWAY),
            SuggestionSourceError::Status { status: 502 }
        );
    }
}
