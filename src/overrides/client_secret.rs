//! OAuth client-secret document construction
//!
//! Produces the same JSON shape Google hands out for a "web" OAuth
//! client, so the host plugin accepts it as if it came from the
//! authentication proxy.

use serde::Serialize;
use tracing::warn;
use url::Url;

const AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
const TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const CERT_URL: &str = "https://www.googleapis.com/oauth2/v1/certs";
const CALLBACK_QUERY: &str = "?oauth2callback=1";

// Field order matters: the serialized document must match what the host
// expects byte for byte.
#[derive(Serialize)]
struct ClientSecret<'a> {
    web: WebClient<'a>,
}

#[derive(Serialize)]
struct WebClient<'a> {
    client_id: &'a str,
    auth_uri: &'a str,
    token_uri: &'a str,
    auth_provider_x509_cert_url: &'a str,
    client_secret: &'a str,
    redirect_uris: [String; 1],
}

/// Builds the client-secret JSON document for the given credentials.
pub(crate) fn client_secret_json(client_id: &str, client_secret: &str, home_url: &Url) -> String {
    let document = ClientSecret {
        web: WebClient {
            client_id,
            auth_uri: AUTH_URI,
            token_uri: TOKEN_URI,
            auth_provider_x509_cert_url: CERT_URL,
            client_secret,
            redirect_uris: [redirect_uri(home_url)],
        },
    };

    // A struct of strings cannot fail to serialize.
    serde_json::to_string(&document).unwrap_or_default()
}

/// Redirect URI: the home URL forced to `https`, trailing slashes
/// stripped, with the callback query appended.
fn redirect_uri(home_url: &Url) -> String {
    let mut secure = home_url.clone();
    if secure.set_scheme("https").is_err() {
        warn!("Could not force https on home URL '{}'", home_url);
    }

    format!("{}{}", secure.as_str().trim_end_matches('/'), CALLBACK_QUERY)
}
