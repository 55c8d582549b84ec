//! User management

use crate::core::context::ApplicationContext;
use crate::core::view_models::UserViewModel;
use crate::domain::{NadError, Result, User};

/// Register an active user for an existing producer
///
/// # Errors
///
/// Returns [`NadError::Validation`] if `email` is empty and
/// [`NadError::NotFound`] if the producer does not exist.
pub async fn add_user(
    ctx: &ApplicationContext,
    email: &str,
    first_name: &str,
    last_name: &str,
    producer_name: &str,
) -> Result<UserViewModel> {
    if email.trim().is_empty() {
        return Err(NadError::Validation("User email required".to_string()));
    }

    let producer = ctx
        .producers()
        .get_by_name(producer_name)
        .await?
        .ok_or_else(|| {
            NadError::NotFound(format!("Producer with name {producer_name} does not exist"))
        })?;

    let user = ctx
        .users()
        .add(User::new(email, first_name, last_name, true, producer))
        .await?;

    tracing::info!(id = ?user.id, email = %user.email, "User added");
    Ok(UserViewModel::from(&user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DataProducer;

    #[tokio::test]
    async fn test_add_user() {
        let ctx = ApplicationContext::in_memory();
        ctx.producers().add(DataProducer::new("NJ")).await.unwrap();

        let view = add_user(&ctx, "a@b.org", "Ada", "Lovelace", "NJ")
            .await
            .unwrap();
        assert_eq!(view.id, 1);
        assert!(view.is_active);
        assert_eq!(view.producer_name, "NJ");
    }

    #[tokio::test]
    async fn test_add_user_unknown_producer() {
        let ctx = ApplicationContext::in_memory();
        let result = add_user(&ctx, "a@b.org", "Ada", "Lovelace", "NJ").await;
        assert!(matches!(result, Err(NadError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_add_user_empty_email() {
        let ctx = ApplicationContext::in_memory();
        ctx.producers().add(DataProducer::new("NJ")).await.unwrap();
        let result = add_user(&ctx, " ", "Ada", "Lovelace", "NJ").await;
        assert!(matches!(result, Err(NadError::Validation(_))));
    }
}
