//! Issue a bearer token for local development:
//! `cargo run --bin mint_token -- <user_id> <username> <pm|instructor>`
use anyhow::{Context, Result, bail};
use onboarding_audit::application::dto::TokenSubject;
use onboarding_audit::config::AppConfig;
use onboarding_audit::domain::user::{Role, UserId};
use onboarding_audit::infrastructure::security::token::BiscuitTokenManager;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let [user_id, username, role] = args.as_slice() else {
        bail!("usage: mint_token <user_id> <username> <pm|instructor>");
    };

    let user_id: i64 = user_id.parse().context("user_id must be an integer")?;
    let role: Role = role.parse()?;
    let config = AppConfig::from_env()?;

    let manager = BiscuitTokenManager::new(config.biscuit_private_key(), config.token_ttl())?;
    let issued = manager.issue(&TokenSubject {
        user_id: UserId::new(user_id)?,
        username: username.clone(),
        role,
        capabilities: role.default_capabilities(),
    })?;

    println!("{}", issued.token);
    eprintln!("expires at {}", issued.expires_at.to_rfc3339());
    Ok(())
}
