//! `add-user` command

use super::{exit_code_for, open_context};
use crate::core::use_cases::add_user;
use clap::Args;

/// Arguments for the add-user command
#[derive(Args, Debug)]
pub struct AddUserArgs {
    /// Contact email
    #[arg(long)]
    pub email: String,

    /// Given name
    #[arg(long)]
    pub first_name: String,

    /// Family name
    #[arg(long)]
    pub last_name: String,

    /// Producer the user acts for
    #[arg(long)]
    pub producer: String,
}

impl AddUserArgs {
    /// Execute the add-user command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match open_context(config_path).await {
            Ok(ctx) => ctx,
            Err(code) => return Ok(code),
        };

        match add_user(
            &ctx,
            &self.email,
            &self.first_name,
            &self.last_name,
            &self.producer,
        )
        .await
        {
            Ok(user) => {
                println!(
                    "✅ User {} ({}) added to {} with id {}",
                    user.full_name, user.email, user.producer_name, user.id
                );
                Ok(0)
            }
            Err(e) => Ok(exit_code_for(&e)),
        }
    }
}
