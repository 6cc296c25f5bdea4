//! Short link lifecycle service.
//!
//! Owns the non-trivial invariants of the system: collision-free code
//! assignment, lazy expiration with best-effort cleanup, synchronous usage
//! recording, and the ownership checks guarding mutation.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, warn};
use url::Url;

use crate::domain::entities::{Link, LinkUpdate, NewLink, User};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, validate_alias};

/// Service orchestrating the short-code lifecycle.
///
/// All persistence is delegated to the injected [`LinkRepository`]; all
/// randomness comes from the injected [`CodeGenerator`], so behavior is
/// deterministic under test.
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
    generator: Arc<CodeGenerator>,
    base_url: String,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `base_url` is the public prefix used to build full short URLs.
    pub fn new(links: Arc<dyn LinkRepository>, generator: Arc<CodeGenerator>, base_url: String) -> Self {
        Self {
            links,
            generator,
            base_url,
        }
    }

    /// Creates a short link.
    ///
    /// With a `custom_alias` the alias is validated and conflict-checked; no
    /// substitute is generated when it is taken. Without one, a fresh random
    /// code is assigned, retrying for as long as collisions occur.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed URL or alias, and
    /// [`AppError::Conflict`] when the alias is already in use.
    pub async fn create_link(
        &self,
        original_url: String,
        custom_alias: Option<String>,
        expires_at: Option<chrono::DateTime<Utc>>,
        owner_id: Option<i64>,
    ) -> Result<Link, AppError> {
        validate_url(&original_url)?;

        if let Some(alias) = custom_alias {
            validate_alias(&alias)?;

            if self.links.find_by_code(&alias).await?.is_some() {
                return Err(AppError::conflict(
                    "Custom alias already in use",
                    json!({ "alias": alias }),
                ));
            }

            return self
                .links
                .insert(NewLink {
                    original_url,
                    short_code: alias,
                    owner_id,
                    expires_at,
                    is_custom: true,
                })
                .await;
        }

        // The pre-check in generate_unique_code is only an optimization; the
        // store's uniqueness constraint is the authoritative guard. Losing
        // that race surfaces as a Conflict here, in which case we roll a new
        // code instead of failing the request.
        loop {
            let code = self.generate_unique_code().await?;

            match self
                .links
                .insert(NewLink {
                    original_url: original_url.clone(),
                    short_code: code,
                    owner_id,
                    expires_at,
                    is_custom: false,
                })
                .await
            {
                Err(AppError::Conflict { .. }) => {
                    debug!("Generated code lost an insert race, retrying");
                }
                other => return other,
            }
        }
    }

    /// Resolves a short code for redirecting.
    ///
    /// Expired links are lazily deleted and reported as gone. The click is
    /// recorded durably before the link is returned, so a served redirect is
    /// always counted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`], [`AppError::Gone`], or
    /// [`AppError::Internal`] if recording the click fails.
    pub async fn resolve(&self, code: &str) -> Result<Link, AppError> {
        let link = self.find_live(code).await?;

        self.links.record_usage(link.id, Utc::now()).await?;

        Ok(link)
    }

    /// Returns usage metadata for a short code.
    ///
    /// Shares the redirect path's expiry gate (including lazy deletion) but
    /// does not count as usage.
    pub async fn stats(&self, code: &str) -> Result<Link, AppError> {
        self.find_live(code).await
    }

    /// Applies a partial update to a link owned by `caller`.
    ///
    /// A supplied `short_code` is validated and conflict-checked against
    /// every link except this one, and marks the link as custom.
    ///
    /// # Errors
    ///
    /// `NotFound` → `Forbidden` → `Gone` → `Validation`/`Conflict`, evaluated
    /// in that order.
    pub async fn update_link(
        &self,
        code: &str,
        caller: &User,
        update: LinkUpdate,
    ) -> Result<Link, AppError> {
        let mut link = self.find_owned(code, caller).await?;

        if link.is_expired(Utc::now()) {
            return Err(self.discard_expired(link).await);
        }

        if let Some(url) = update.original_url {
            validate_url(&url)?;
            link.original_url = url;
        }

        if let Some(new_code) = update.short_code {
            validate_alias(&new_code)?;

            if let Some(existing) = self.links.find_by_code(&new_code).await? {
                // Re-submitting the link's own current code is fine.
                if existing.id != link.id {
                    return Err(AppError::conflict(
                        "Short code already in use",
                        json!({ "code": new_code }),
                    ));
                }
            }

            link.short_code = new_code;
            link.is_custom = true;
        }

        if let Some(expires_at) = update.expires_at {
            link.expires_at = expires_at;
        }

        self.links.update(&link).await
    }

    /// Deletes a link owned by `caller`.
    ///
    /// Deletion is unconditional for the owner: expired links are deletable
    /// too, so there is no expiry gate on this path.
    pub async fn delete_link(&self, code: &str, caller: &User) -> Result<(), AppError> {
        let link = self.find_owned(code, caller).await?;

        self.links.delete(link.id).await?;

        Ok(())
    }

    /// Finds non-expired links whose destination URL contains `term`.
    ///
    /// A trailing slash on the term is ignored so `https://example.com/`
    /// matches links stored without one.
    pub async fn search_links(&self, term: &str) -> Result<Vec<Link>, AppError> {
        self.links
            .search_by_url(term.trim_end_matches('/'), Utc::now())
            .await
    }

    /// Builds the full short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }

    /// Generates a code not present in the store at the time of the check.
    ///
    /// The loop has no attempt cap; with a 62^6 code space the expected
    /// number of retries stays near one.
    async fn generate_unique_code(&self) -> Result<String, AppError> {
        loop {
            let code = self.generator.generate();

            if self.links.find_by_code(&code).await?.is_none() {
                return Ok(code);
            }
        }
    }

    /// Looks up a code and applies the expiry gate.
    async fn find_live(&self, code: &str) -> Result<Link, AppError> {
        let link = self.get_link(code).await?;

        if link.is_expired(Utc::now()) {
            return Err(self.discard_expired(link).await);
        }

        Ok(link)
    }

    /// Looks up a code and checks that `caller` owns it.
    ///
    /// Anonymous links have no owner and are not mutable through the API.
    async fn find_owned(&self, code: &str, caller: &User) -> Result<Link, AppError> {
        let link = self.get_link(code).await?;

        if link.owner_id != Some(caller.id) {
            return Err(AppError::forbidden(
                "Not authorized to modify this link",
                json!({ "code": code }),
            ));
        }

        Ok(link)
    }

    async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        self.links.find_by_code(code).await?.ok_or_else(|| {
            AppError::not_found("Short link not found", json!({ "code": code }))
        })
    }

    /// Lazily deletes an expired link and builds the `Gone` outcome.
    ///
    /// Cleanup is best-effort: a failed or raced delete is logged and never
    /// masks the `Gone` answer to the caller. Concurrent deleters are safe
    /// because the repository delete is idempotent.
    async fn discard_expired(&self, link: Link) -> AppError {
        match self.links.delete(link.id).await {
            Ok(removed) => {
                if removed {
                    debug!(code = %link.short_code, "Lazily deleted expired link");
                }
            }
            Err(e) => {
                warn!(code = %link.short_code, error = %e, "Failed to delete expired link");
            }
        }

        AppError::gone(
            "Short link has expired",
            json!({ "code": link.short_code }),
        )
    }
}

/// Validates that a destination URL parses and uses http(s).
fn validate_url(raw: &str) -> Result<(), AppError> {
    let parsed = Url::parse(raw)
        .map_err(|e| AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() })))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AppError::bad_request(
            "URL scheme must be http or https",
            json!({ "scheme": parsed.scheme() }),
        ));
    }

    Ok(())
}
