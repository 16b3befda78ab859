use super::*;
use anyhow::Result;
use bytes::Bytes;
use http::header::AUTHORIZATION;
use http::{HeaderValue, Method};
use log::debug;
use pretty_assertions::assert_eq;
use sigv4_auth::time::parse_rfc3339;
use sigv4_auth::Config;

fn has_security_token(req: &Request<impl AsRef<[u8]>>) -> bool {
    req.headers()
        .keys()
        .any(|k| k.as_str().eq_ignore_ascii_case("X-Amz-Security-Token"))
}

#[test]
fn test_sign_permanent_credentials() -> Result<()> {
    init_logger();

    let signer = test_signer(None);
    let mut req = test_request();
    signer.sign(&mut req, test_time())?;
    debug!("signed request: {req:?}");

    assert_eq!(req.headers()[AUTHORIZATION], expected_authorization().as_str());
    assert_eq!(req.headers()["x-amz-date"], "20200420T203030Z");
    assert!(!has_security_token(&req));
    assert_eq!(req.headers().len(), 2);
    Ok(())
}

#[test]
fn test_sign_temporary_credentials() -> Result<()> {
    init_logger();

    let signer = test_signer(Some(ACCESS_TOKEN));
    let mut req = test_request();
    signer.sign(&mut req, test_time())?;

    // The security token is attached but not signed.
    assert_eq!(req.headers()[AUTHORIZATION], expected_authorization().as_str());
    assert_eq!(req.headers()["X-Amz-Security-Token"], ACCESS_TOKEN);
    assert_eq!(req.headers()["x-amz-date"], "20200420T203030Z");
    assert_eq!(req.headers().len(), 3);
    Ok(())
}

#[test]
fn test_sign_overwrites_existing_headers() -> Result<()> {
    let signer = test_signer(None);
    let mut req = test_request();
    req.headers_mut()
        .insert(AUTHORIZATION, HeaderValue::from_static("Bearer stale"));
    req.headers_mut()
        .append(AUTHORIZATION, HeaderValue::from_static("Bearer another"));
    req.headers_mut()
        .insert("x-amz-date", HeaderValue::from_static("19700101T000000Z"));
    req.headers_mut()
        .insert("x-custom", HeaderValue::from_static("kept"));

    signer.sign(&mut req, test_time())?;

    assert_eq!(req.headers().get_all(AUTHORIZATION).iter().count(), 1);
    assert_eq!(req.headers()[AUTHORIZATION], expected_authorization().as_str());
    assert_eq!(req.headers().get_all("x-amz-date").iter().count(), 1);
    assert_eq!(req.headers()["x-amz-date"], "20200420T203030Z");
    assert_eq!(req.headers()["x-custom"], "kept");
    Ok(())
}

#[test]
fn test_sign_with_body_changes_signature() -> Result<()> {
    let signer = test_signer(None);

    let mut without_body = test_request();
    signer.sign(&mut without_body, test_time())?;

    let body = serde_json::json!({"username": "tstark", "team": "avengers"}).to_string();
    let mut with_body = Request::get("https://www.example.com/details?username=tstark&team=avengers")
        .body(body)?;
    signer.sign(&mut with_body, test_time())?;

    assert_eq!(
        without_body.headers()["x-amz-date"],
        with_body.headers()["x-amz-date"]
    );
    assert_ne!(
        without_body.headers()[AUTHORIZATION],
        with_body.headers()[AUTHORIZATION]
    );
    Ok(())
}

#[test]
fn test_sign_at_different_instants() -> Result<()> {
    let signer = test_signer(None);

    let mut first = test_request();
    signer.sign(&mut first, test_time())?;
    let mut second = test_request();
    signer.sign(&mut second, parse_rfc3339("2020-04-20T20:30:31Z")?)?;

    assert_eq!(second.headers()["x-amz-date"], "20200420T203031Z");
    assert_ne!(first.headers()["x-amz-date"], second.headers()["x-amz-date"]);
    assert_ne!(first.headers()[AUTHORIZATION], second.headers()[AUTHORIZATION]);
    Ok(())
}

#[test]
fn test_sign_across_days_uses_new_scope() -> Result<()> {
    let signer = test_signer(None);

    let before = signer.calculate(&test_request(), parse_rfc3339("2020-04-20T23:59:59Z")?)?;
    let after = signer.calculate(&test_request(), parse_rfc3339("2020-04-21T00:00:00Z")?)?;

    assert_eq!(
        before.credential_scope(),
        "20200420/us-east-1/execute-api/aws4_request"
    );
    assert_eq!(
        after.credential_scope(),
        "20200421/us-east-1/execute-api/aws4_request"
    );
    assert_ne!(before.signature(), after.signature());
    Ok(())
}

#[test]
fn test_sign_now_keeps_timestamp_and_scope_consistent() -> Result<()> {
    let signer = test_signer(None);
    let mut req = test_request();
    signer.sign_now(&mut req)?;

    let date = req.headers()["x-amz-date"].to_str()?.to_string();
    assert_eq!(date.len(), 16);
    assert!(date.ends_with('Z'));

    let authorization = req.headers()[AUTHORIZATION].to_str()?;
    let expected_scope = format!("Credential={ACCESS_KEY_ID}/{}/{REGION}/", &date[..8]);
    assert!(authorization.contains(&expected_scope));
    Ok(())
}

#[test]
fn test_sign_parts_and_request_agree() -> Result<()> {
    let signer = test_signer(None);

    let (mut parts, _) = test_request().into_parts();
    signer.sign(&mut parts, test_time())?;

    assert_eq!(parts.headers[AUTHORIZATION], expected_authorization().as_str());
    Ok(())
}

#[test]
fn test_sign_bytes_body() -> Result<()> {
    let signer = test_signer(None);

    let mut as_str = Request::put("https://www.example.com/details").body("Hello,World!")?;
    let mut as_bytes = Request::builder()
        .method(Method::PUT)
        .uri("https://www.example.com/details")
        .body(Bytes::from_static(b"Hello,World!"))?;

    signer.sign(&mut as_str, test_time())?;
    signer.sign(&mut as_bytes, test_time())?;

    assert_eq!(as_str.headers()[AUTHORIZATION], as_bytes.headers()[AUTHORIZATION]);
    Ok(())
}

#[test]
fn test_sign_concurrently() -> Result<()> {
    let signer = &test_signer(Some(ACCESS_TOKEN));
    let expected = expected_authorization();

    std::thread::scope(|s| {
        let handles = (0..8)
            .map(|_| {
                s.spawn(move || {
                    let mut req = test_request();
                    signer.sign(&mut req, test_time()).expect("sign must succeed");
                    req.headers()[AUTHORIZATION]
                        .to_str()
                        .expect("must be valid")
                        .to_string()
                })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            assert_eq!(handle.join().expect("thread must not panic"), expected);
        }
    });
    Ok(())
}

#[test]
fn test_signer_from_json_config() -> Result<()> {
    let cfg: Config = serde_json::from_value(serde_json::json!({
        "access_key_id": ACCESS_KEY_ID,
        "secret_access_key": SECRET_ACCESS_KEY,
        "session_token": ACCESS_TOKEN,
        "service": SERVICE,
        "region": REGION,
    }))?;

    let signer = Signer::from_config(cfg)?;
    let mut req = test_request();
    signer.sign(&mut req, test_time())?;

    assert_eq!(req.headers()[AUTHORIZATION], expected_authorization().as_str());
    assert_eq!(req.headers()["x-amz-security-token"], ACCESS_TOKEN);
    Ok(())
}

#[test]
fn test_sign_request_without_host() {
    let signer = test_signer(None);
    let mut req = Request::get("/details").body("").expect("request must be valid");

    let err = signer
        .sign(&mut req, test_time())
        .expect_err("request without host can't be signed");

    assert_eq!(err.kind(), sigv4_auth::ErrorKind::RequestInvalid);
    assert!(req.headers().is_empty());
}
