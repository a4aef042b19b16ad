#![allow(dead_code)]

use bytes::Bytes;
use clouddrive_api_client::{ApiClient, PendingFile};
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{json, Value};

pub fn client_for(server: &ServerGuard) -> ApiClient {
    ApiClient::new(server.url()).unwrap()
}

pub fn text_file(name: &str) -> PendingFile {
    PendingFile::new(name, "text/plain", Bytes::from(format!("contents of {}", name)))
}

pub fn stored_key(name: &str) -> String {
    let (base, ext) = name.rsplit_once('.').unwrap_or((name, ""));
    format!("uploads/{}-0000{}{}", base, if ext.is_empty() { "" } else { "." }, ext)
}

fn put_path(name: &str) -> String {
    format!("/test-bucket/{}", stored_key(name))
}

/// Presign response pointing every slot back at the mock server.
pub fn presign_body(server: &ServerGuard, files: &[PendingFile]) -> Value {
    let slots: Vec<Value> = files
        .iter()
        .map(|f| {
            let key = stored_key(&f.name);
            json!({
                "originalName": f.name,
                "fileName": key.trim_start_matches("uploads/"),
                "presignedUrl": format!(
                    "{}{}?X-Amz-Expires=300&X-Amz-Signature=test",
                    server.url(),
                    put_path(&f.name)
                ),
                "s3Key": key,
                "size": f.size,
                "type": f.content_type,
            })
        })
        .collect();

    json!({
        "message": "Presigned URLs generated successfully",
        "presignedData": slots,
        "count": files.len(),
    })
}

pub async fn mock_presign(server: &mut ServerGuard, files: &[PendingFile]) -> Mock {
    let body = presign_body(server, files);
    server
        .mock("POST", "/generate-presigned-urls")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .expect(1)
        .create_async()
        .await
}

pub async fn mock_put(server: &mut ServerGuard, name: &str, status: usize, hits: usize) -> Mock {
    server
        .mock("PUT", put_path(name).as_str())
        .match_query(Matcher::Any)
        .with_status(status)
        .expect(hits)
        .create_async()
        .await
}

pub async fn mock_confirm(server: &mut ServerGuard, name: &str, hits: usize) -> Mock {
    let key = stored_key(name);
    let body = json!({
        "message": "File upload confirmed",
        "uploadedFile": {
            "originalName": name,
            "fileName": key.trim_start_matches("uploads/"),
            "url": format!("https://test-bucket.s3.us-east-1.amazonaws.com/{}", key),
            "size": 0,
            "type": "text/plain",
        }
    });
    server
        .mock("POST", "/confirm-upload")
        .match_body(Matcher::PartialJson(json!({ "s3Key": key })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .expect(hits)
        .create_async()
        .await
}

pub fn file_entry(name: &str, size: u64) -> Value {
    let key = format!("uploads/{}", name);
    json!({
        "key": key,
        "fileName": name,
        "url": format!("https://test-bucket.s3.us-east-1.amazonaws.com/{}", key),
        "size": size,
        "lastModified": "2024-05-01T12:00:00Z",
    })
}

pub async fn mock_list(server: &mut ServerGuard, entries: Vec<Value>, hits: usize) -> Mock {
    let body = json!({
        "message": "Files retrieved successfully",
        "count": entries.len(),
        "files": entries,
    });
    server
        .mock("GET", "/list-files")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .expect(hits)
        .create_async()
        .await
}
