use super::*;
use anyhow::Result;
use http::header::AUTHORIZATION;
use http::Method;
use pretty_assertions::assert_eq;

#[test]
fn test_sign_reqwest_request() -> Result<()> {
    init_logger();

    let signer = test_signer(Some(ACCESS_TOKEN));
    let url: reqwest::Url = "https://www.example.com/details?username=tstark&team=avengers".parse()?;
    let mut req = reqwest::Request::new(Method::GET, url);
    signer.sign(&mut req, test_time())?;

    assert_eq!(req.headers()[AUTHORIZATION], expected_authorization().as_str());
    assert_eq!(req.headers()["x-amz-date"], "20200420T203030Z");
    assert_eq!(req.headers()["x-amz-security-token"], ACCESS_TOKEN);
    Ok(())
}

#[test]
fn test_sign_reqwest_request_same_as_http_request() -> Result<()> {
    let signer = test_signer(None);
    let uri = "http://127.0.0.1:9000/hello%20world?max-keys=3";

    let mut expected = Request::put(uri).body("Hello,World!")?;
    signer.sign(&mut expected, test_time())?;

    let mut actual = reqwest::Request::new(Method::PUT, uri.parse()?);
    *actual.body_mut() = Some(reqwest::Body::from("Hello,World!"));
    signer.sign(&mut actual, test_time())?;

    assert_eq!(
        actual.headers()[AUTHORIZATION],
        expected.headers()[AUTHORIZATION]
    );
    Ok(())
}
