//! Where imported documents land.

use std::future::Future;

use serde_json::Value;

use crate::{Error, Result};

/// A keyed JSON document store accepting upserts.
pub trait DocumentSink: Send + Sync {
  /// Write `document` under `collection`/`id`, overwriting any existing
  /// document with that key.
  fn put(
    &self,
    collection: &str,
    id: &str,
    document: &Value,
  ) -> impl Future<Output = Result<()>> + Send;
}

/// Sink backed by the document service's REST interface: each document is
/// PUT to `{base_url}/{collection}/{id}`; the service upserts by key.
pub struct HttpSink {
  base_url: String,
  client:   reqwest::Client,
}

impl HttpSink {
  pub fn new(base_url: impl Into<String>) -> Self {
    let base_url: String = base_url.into();
    Self {
      base_url: base_url.trim_end_matches('/').to_string(),
      client:   reqwest::Client::new(),
    }
  }
}

impl DocumentSink for HttpSink {
  async fn put(
    &self,
    collection: &str,
    id: &str,
    document: &Value,
  ) -> Result<()> {
    let url = format!("{}/{collection}/{id}", self.base_url);
    self
      .client
      .put(&url)
      .json(document)
      .send()
      .await
      .and_then(|resp| resp.error_for_status())
      .map_err(|e| Error::Write(Box::new(e)))?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use httpmock::prelude::*;
  use serde_json::json;

  #[tokio::test]
  async fn put_targets_the_collection_and_id_path() {
    let server = MockServer::start_async().await;
    let mock = server
      .mock_async(|when, then| {
        when
          .method(PUT)
          .path("/children/child_1")
          .json_body(json!({"id": "child_1", "name": "Sari"}));
        then.status(200);
      })
      .await;

    let sink = HttpSink::new(server.base_url());
    sink
      .put("children", "child_1", &json!({"id": "child_1", "name": "Sari"}))
      .await
      .unwrap();
    mock.assert_async().await;
  }

  #[tokio::test]
  async fn server_error_surfaces_as_write_error() {
    let server = MockServer::start_async().await;
    server
      .mock_async(|when, then| {
        when.method(PUT);
        then.status(500);
      })
      .await;

    let sink = HttpSink::new(server.base_url());
    let result = sink.put("children", "child_1", &json!({})).await;
    assert!(matches!(result, Err(Error::Write(_))));
  }
}
