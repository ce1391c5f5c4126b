use std::{fmt, ops::Deref, str::FromStr};

use anyhow::{bail, Error, Result};
use async_trait::async_trait;
use http::{header, Request, Response};
use url::Url;

const HTTPS: &str = "https";

/// Generic HTTP client.
///
/// A trait is used here so to facilitate native HTTP/TLS when compiled for mobile applications.
/// Timeouts and retries are the responsibility of the implementation.
#[async_trait]
pub trait AsyncHttpClient {
    async fn execute(&self, request: Request<Vec<u8>>) -> Result<Response<Vec<u8>>>;
}

pub(crate) fn base_request() -> http::request::Builder {
    Request::builder().header(header::ACCEPT, "application/json")
}

/// A url that always uses the `https` scheme.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct HttpsUrl(Url);

impl HttpsUrl {
    pub fn into_inner(self) -> Url {
        self.0
    }
}

impl Deref for HttpsUrl {
    type Target = Url;

    fn deref(&self) -> &Url {
        &self.0
    }
}

impl TryFrom<Url> for HttpsUrl {
    type Error = Error;

    fn try_from(url: Url) -> Result<Self, Self::Error> {
        if url.scheme() != HTTPS {
            bail!("must use the https scheme, found '{}'", url.scheme())
        }
        Ok(Self(url))
    }
}

impl FromStr for HttpsUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Url::parse(s)?.try_into()
    }
}

impl From<HttpsUrl> for Url {
    fn from(HttpsUrl(url): HttpsUrl) -> Url {
        url
    }
}

impl fmt::Display for HttpsUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn https_only() {
        let url: HttpsUrl = "HTTPS://issuer.example/pd".parse().unwrap();
        assert_eq!(url.as_str(), "https://issuer.example/pd");

        for rejected in [
            "http://issuer.example/pd",
            "ftp://issuer.example/pd",
            "issuer.example/pd",
        ] {
            assert!(rejected.parse::<HttpsUrl>().is_err(), "{rejected}");
        }

        let plain = Url::parse("http://issuer.example/pd").unwrap();
        assert!(HttpsUrl::try_from(plain).is_err());
    }
}
