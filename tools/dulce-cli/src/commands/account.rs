//! Login and registration against the demo customer directory.

use anyhow::{bail, Result};
use dulce_auth::{
    welcome_message, AuthError, LoginForm, RegistrationForm, UserProfile, LOGIN_FAILED_EMAIL_HINT,
    LOGIN_FAILED_PASSWORD_HINT,
};
use dulce_commerce::cart::NullRenderer;
use dulce_storefront::StorefrontError;

use super::{AccountArgs, AccountCommand};
use crate::context::Context;

/// Run the account command.
pub async fn run(args: AccountArgs, ctx: &Context) -> Result<()> {
    let (mut session, _) = ctx.open_session(NullRenderer)?;

    let result = match args.command {
        AccountCommand::Login { email, password } => {
            let spinner = ctx.output.spinner("Iniciando sesión...");
            let result = tokio::select! {
                result = session.login(LoginForm::new(email, password)) => result,
                _ = tokio::signal::ctrl_c() => Err(StorefrontError::Cancelled),
            };
            spinner.finish_and_clear();
            result
        }
        AccountCommand::Register {
            name,
            email,
            password,
            confirm,
            phone,
            accept_terms,
        } => {
            let form = RegistrationForm {
                name,
                email,
                password,
                confirm,
                phone,
                accept_terms,
            };
            let spinner = ctx.output.spinner("Creando cuenta...");
            let result = tokio::select! {
                result = session.register(form) => result,
                _ = tokio::signal::ctrl_c() => Err(StorefrontError::Cancelled),
            };
            spinner.finish_and_clear();
            result
        }
    };

    for notification in session.notifier().visible() {
        ctx.output.notification(&notification);
    }

    match result {
        Ok(profile) => {
            report(&profile, ctx);
            Ok(())
        }
        Err(StorefrontError::Auth(AuthError::Validation(errors))) => {
            for error in errors.errors() {
                ctx.output.warn(&format!("{}: {}", error.field, error.message));
            }
            Err(AuthError::Validation(errors).into())
        }
        Err(StorefrontError::Auth(AuthError::InvalidCredentials)) => {
            ctx.output.warn(LOGIN_FAILED_EMAIL_HINT);
            ctx.output.warn(LOGIN_FAILED_PASSWORD_HINT);
            Err(AuthError::InvalidCredentials.into())
        }
        Err(e) if e.is_cancelled() => bail!("Cancelled"),
        Err(e) => Err(e.into()),
    }
}

fn report(profile: &UserProfile, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(profile);
        return;
    }
    ctx.output.success(&welcome_message(profile));
    ctx.output.kv("Email", &profile.email);
    if let Some(phone) = &profile.phone {
        ctx.output.kv("Teléfono", phone);
    }
}
