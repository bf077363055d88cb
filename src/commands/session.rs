use anyhow::{Context, Result};

use crate::api::AuthClient;

#[tracing::instrument(skip(auth, password))]
pub async fn login(auth: &AuthClient, email: &str, password: &str) -> Result<()> {
    auth.login(email, password)
        .await
        .with_context(|| format!("Failed to log in as {}", email))?;
    println!("Logged in as {}.", email);
    Ok(())
}

#[tracing::instrument(skip(auth))]
pub async fn logout(auth: &AuthClient) -> Result<()> {
    auth.logout().await.context("Failed to remove the session")?;
    println!("Logged out.");
    Ok(())
}
