use error_stack::ResultExt;
use google_sheets4::hyper;
use google_sheets4::oauth2::{self, authenticator::Authenticator, ServiceAccountKey};

use crate::ports::sheet_backend::SheetConnectError;

use super::http_client::HttpsConnector;

pub async fn auth(
    key: ServiceAccountKey,
    client: hyper::Client<HttpsConnector>,
) -> error_stack::Result<Authenticator<HttpsConnector>, SheetConnectError> {
    let client_email = key.client_email.clone();
    oauth2::ServiceAccountAuthenticator::with_client(key, client)
        .build()
        .await
        .change_context(SheetConnectError::Authentication)
        .attach_printable_lazy(|| {
            format!("could not create an authenticator for {}", client_email)
        })
}
