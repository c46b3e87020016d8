use anyhow::Result;
use shop_api::AuthApi;

pub async fn session(auth: &AuthApi) -> Result<()> {
    let session = auth.fetch_session().await?;

    println!("Authenticated: {}", session.is_authenticated);
    if let Some(verified) = session.verified {
        println!("Verified: {}", verified);
    }
    if session.captcha_disabled != Some(true) && !session.no_captcha_key.is_empty() {
        println!("Captcha site key: {}", session.no_captcha_key);
    }

    Ok(())
}
