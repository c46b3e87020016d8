use anyhow::{bail, Result};
use clap::Args;
use shop_api::AuthApi;

use super::login::{authenticate, Credentials};

#[derive(Args)]
pub struct PairSubCommand {
    /// Pairing secret; when absent one is generated after logging in
    #[arg(long, conflicts_with = "email")]
    secret: Option<String>,
    /// Two-factor code sent along with the pairing secret
    #[arg(long)]
    code: Option<String>,
    /// Account email
    #[arg(long)]
    email: Option<String>,
    /// Account password
    #[arg(long, env = "WALLET_SHOP_PASSWORD", hide_env_values = true)]
    password: Option<String>,
    /// Solved captcha token
    #[arg(long)]
    captcha: Option<String>,
}

pub async fn pair(auth: &AuthApi, sub_command_args: &PairSubCommand) -> Result<()> {
    let secret = match &sub_command_args.secret {
        Some(secret) => secret.clone(),
        None => {
            let (Some(email), Some(password)) =
                (&sub_command_args.email, &sub_command_args.password)
            else {
                bail!("Either --secret or --email and --password are required");
            };

            let credentials = Credentials {
                email: email.clone(),
                password: password.clone(),
                captcha: sub_command_args.captcha.clone(),
                two_factor_code: sub_command_args.code.clone(),
            };
            let (session, response) = authenticate(auth, &credentials).await?;

            if response.email_authentication_pending {
                bail!("Confirm the login from your email, then pair again");
            }

            auth.generate_pairing_code(&session.csrf_token).await?
        }
    };

    let token = auth.pair(&secret, sub_command_args.code.as_deref()).await?;

    println!("{}", token);

    Ok(())
}
