use anyhow::{bail, Result};
use clap::Args;
use shop_api::{AuthApi, LoginResponse, Session};

#[derive(Args)]
pub struct LoginSubCommand {
    #[command(flatten)]
    pub credentials: Credentials,
}

/// Account credentials
#[derive(Args)]
pub struct Credentials {
    /// Account email
    #[arg(long)]
    pub email: String,
    /// Account password
    #[arg(long, env = "WALLET_SHOP_PASSWORD", hide_env_values = true)]
    pub password: String,
    /// Solved captcha token, when the session asks for one
    #[arg(long)]
    pub captcha: Option<String>,
    /// Two-factor code, when the account has one enabled
    #[arg(long)]
    pub two_factor_code: Option<String>,
}

pub async fn login(auth: &AuthApi, sub_command_args: &LoginSubCommand) -> Result<()> {
    let (_, response) = authenticate(auth, &sub_command_args.credentials).await?;

    if response.email_authentication_pending {
        println!("Confirm the login from the email sent to your address");
    } else if response.access_types.is_empty() {
        println!("Logged in without access");
    } else {
        println!("Logged in: {}", response.access_types.join(", "));
    }

    Ok(())
}

/// Log in, submitting the two-factor code when the server asks for it
///
/// Returns the session whose CSRF token later calls must send.
pub async fn authenticate(
    auth: &AuthApi,
    credentials: &Credentials,
) -> Result<(Session, LoginResponse)> {
    let session = auth.fetch_session().await?;

    let mut response = auth
        .login(
            &credentials.email,
            &credentials.password,
            &session.csrf_token,
            credentials.captcha.as_deref(),
        )
        .await?;

    if response.two_factor_pending {
        let Some(code) = &credentials.two_factor_code else {
            bail!("Two-factor code required, pass --two-factor-code");
        };
        response = auth.submit_two_factor(code, &session.csrf_token).await?;
    }

    Ok((session, response))
}
