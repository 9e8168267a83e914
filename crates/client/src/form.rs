//! Create/edit form controller.
//!
//! The form is an explicit state machine over [`FormState`]:
//!
//! ```text
//! Editing -> Validating -> { Submittable, Blocked }
//! Submittable --submit--> Submitting -> { Succeeded, Failed(message) }
//! ```
//!
//! Synchronous rules run inside [`ProductFormController::on_field_change`]. The remote id
//! check runs outside the controller: `on_field_change` hands back a [`CheckTicket`], the
//! caller resolves it through the shared [`UniquenessChecker`], and
//! [`ProductFormController::apply_uniqueness`] commits the outcome only if the ticket is
//! still the latest one. [`ProductFormController::change`] chains the three for callers
//! that do not need overlapping checks.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use thiserror::Error;

use finprod_core::{Entity, StoreError};
use finprod_products::{
    Product, ProductField, ValidationErrorKind, ValidationErrors, dates, rules,
};

use crate::config::ClientConfig;
use crate::messages::{DefaultCatalog, MessageCatalog};
use crate::store::ProductStore;
use crate::uniqueness::{CheckOutcome, CheckTicket, UniquenessChecker};

/// Precondition failures of the form controller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("product {0} not found")]
    NotFound(String),

    #[error("field {0} is not editable")]
    FieldDisabled(ProductField),

    #[error("could not load products: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// Editing the product registered under this id.
    Edit(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Submission {
    #[default]
    Idle,
    Submitting,
    /// Carries the confirmation message.
    Succeeded(String),
    /// Carries the user-facing failure message.
    Failed(String),
}

/// Derived position in the form state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Nothing touched since initialization or reset.
    Editing,
    /// A uniqueness check is outstanding.
    Validating,
    Submittable,
    Blocked,
    Submitting,
    Succeeded,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldState {
    pub value: String,
    pub touched: bool,
    pub errors: ValidationErrors,
    pub async_pending: bool,
    /// Disabled fields are neither editable nor part of form validity.
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub mode: FormMode,
    pub submission: Submission,
    fields: [FieldState; 6],
}

impl FormState {
    fn new(mode: FormMode) -> Self {
        Self {
            mode,
            submission: Submission::Idle,
            fields: Default::default(),
        }
    }

    pub fn field(&self, field: ProductField) -> &FieldState {
        &self.fields[slot(field)]
    }

    fn field_mut(&mut self, field: ProductField) -> &mut FieldState {
        &mut self.fields[slot(field)]
    }

    pub fn value(&self, field: ProductField) -> &str {
        &self.field(field).value
    }

    /// No enabled field has errors.
    pub fn is_valid(&self) -> bool {
        self.fields
            .iter()
            .all(|f| f.disabled || f.errors.is_empty())
    }

    pub fn has_pending_checks(&self) -> bool {
        self.fields.iter().any(|f| f.async_pending)
    }

    fn is_pristine(&self) -> bool {
        self.fields.iter().all(|f| !f.touched)
    }
}

fn slot(field: ProductField) -> usize {
    field as usize
}

/// Signal to leave the form after a successful submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigateAway {
    pub delay: Duration,
}

impl NavigateAway {
    /// Resolves once it is time to navigate.
    pub async fn wait(self) {
        tokio::time::sleep(self.delay).await;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form was not submittable; every field is now touched.
    Blocked,
    Succeeded { message: String, navigate: NavigateAway },
    Failed { message: String },
}

/// Controller behind the product create/edit form.
pub struct ProductFormController<S: ProductStore> {
    store: Arc<S>,
    /// `None` in edit mode: the id cannot change, so it is never checked.
    checker: Option<Arc<UniquenessChecker<S>>>,
    catalog: Arc<dyn MessageCatalog>,
    navigate_delay: Duration,
    today: NaiveDate,
    state: FormState,
}

impl<S: ProductStore> ProductFormController<S> {
    /// Empty form registering a new product.
    pub fn create(store: Arc<S>, config: &ClientConfig) -> Self {
        let checker = UniquenessChecker::new(store.clone(), config.uniqueness_debounce);
        let mut form = Self::base(store, config, FormMode::Create, Some(Arc::new(checker)));
        form.revalidate_all();
        form
    }

    /// Form pre-filled with the product `id` taken from `products` (the list's current set).
    pub fn edit(
        store: Arc<S>,
        config: &ClientConfig,
        products: &[Product],
        id: &str,
    ) -> Result<Self, FormError> {
        let product = products
            .iter()
            .find(|p| p.has_id(id))
            .ok_or_else(|| FormError::NotFound(id.to_string()))?;

        let mut form = Self::base(store, config, FormMode::Edit(product.id.clone()), None);
        for field in ProductField::ALL {
            form.state.field_mut(field).value = product.field_value(field);
        }
        form.state.field_mut(ProductField::Id).disabled = true;
        form.revalidate_all();

        tracing::debug!(id = %product.id, "edit form initialized");
        Ok(form)
    }

    /// Like [`edit`](Self::edit), fetching the current set from the store first.
    pub async fn edit_from_store(
        store: Arc<S>,
        config: &ClientConfig,
        id: &str,
    ) -> Result<Self, FormError> {
        let products = store.list().await?;
        Self::edit(store, config, &products, id)
    }

    fn base(
        store: Arc<S>,
        config: &ClientConfig,
        mode: FormMode,
        checker: Option<Arc<UniquenessChecker<S>>>,
    ) -> Self {
        Self {
            store,
            checker,
            catalog: Arc::new(DefaultCatalog),
            navigate_delay: config.navigate_delay,
            today: chrono::Local::now().date_naive(),
            state: FormState::new(mode),
        }
    }

    pub fn with_catalog(mut self, catalog: Arc<dyn MessageCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Override the date the minimum-date rule compares against.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self.revalidate_all();
        self
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn mode(&self) -> &FormMode {
        &self.state.mode
    }

    pub fn is_edit_mode(&self) -> bool {
        matches!(self.state.mode, FormMode::Edit(_))
    }

    pub fn uniqueness_checker(&self) -> Option<Arc<UniquenessChecker<S>>> {
        self.checker.clone()
    }

    pub fn phase(&self) -> FormPhase {
        match self.state.submission {
            Submission::Submitting => return FormPhase::Submitting,
            Submission::Succeeded(_) => return FormPhase::Succeeded,
            Submission::Idle | Submission::Failed(_) => {}
        }

        if self.state.is_pristine() {
            FormPhase::Editing
        } else if self.state.has_pending_checks() {
            FormPhase::Validating
        } else if self.state.is_valid() {
            FormPhase::Submittable
        } else {
            FormPhase::Blocked
        }
    }

    /// Store a new value for `field` and re-run the affected rules.
    ///
    /// Changing `date_release` overwrites `date_revision` with the derived date. Returns a
    /// ticket when the id needs a remote uniqueness check.
    pub fn on_field_change(
        &mut self,
        field: ProductField,
        value: impl Into<String>,
    ) -> Result<Option<CheckTicket>, FormError> {
        if self.state.field(field).disabled {
            return Err(FormError::FieldDisabled(field));
        }

        let value = value.into();
        {
            let state = self.state.field_mut(field);
            state.value = value.clone();
            state.touched = true;
        }

        match field {
            ProductField::DateRelease => {
                if let Some(revision) = dates::parse_date(&value).and_then(dates::derive_revision) {
                    self.state.field_mut(ProductField::DateRevision).value =
                        dates::format_date(revision);
                }
                self.revalidate(ProductField::DateRelease);
                self.revalidate(ProductField::DateRevision);
            }
            ProductField::Id => {
                // A verdict for the previous value no longer applies.
                self.state
                    .field_mut(ProductField::Id)
                    .errors
                    .remove(&ValidationErrorKind::DuplicateId);
                self.revalidate(ProductField::Id);
                return Ok(self.schedule_uniqueness_check());
            }
            other => self.revalidate(other),
        }

        Ok(None)
    }

    /// Commit a uniqueness outcome if `ticket` is still the latest id check.
    ///
    /// Returns whether the outcome was applied.
    pub fn apply_uniqueness(&mut self, ticket: &CheckTicket, outcome: CheckOutcome) -> bool {
        let Some(checker) = &self.checker else {
            return false;
        };

        let id = self.state.field_mut(ProductField::Id);
        if !checker.is_current(ticket) || id.value != ticket.id() {
            tracing::debug!(id = %ticket.id(), "dropping stale uniqueness outcome");
            return false;
        }

        match outcome {
            CheckOutcome::Superseded => return false,
            CheckOutcome::Duplicate => {
                id.errors.insert(ValidationErrorKind::DuplicateId);
            }
            CheckOutcome::Valid => {
                id.errors.remove(&ValidationErrorKind::DuplicateId);
            }
        }
        id.async_pending = false;
        true
    }

    /// Change a field and, for the id, wait for its uniqueness check.
    pub async fn change(
        &mut self,
        field: ProductField,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        if let Some(ticket) = self.on_field_change(field, value)? {
            if let Some(checker) = self.checker.clone() {
                let outcome = checker.resolve(&ticket, None).await;
                self.apply_uniqueness(&ticket, outcome);
            }
        }
        Ok(())
    }

    /// Mark `field` as visited (blur).
    pub fn mark_touched(&mut self, field: ProductField) {
        self.state.field_mut(field).touched = true;
    }

    /// The single error kind to show for `field`, if any.
    ///
    /// Only touched fields show errors; precedence is
    /// `Required > TooShort > TooLong > field-specific`.
    pub fn field_error(&self, field: ProductField) -> Option<ValidationErrorKind> {
        let state = self.state.field(field);
        if !state.touched || state.disabled {
            return None;
        }
        rules::primary(&state.errors)
    }

    pub fn field_error_message(&self, field: ProductField) -> Option<String> {
        self.field_error(field)
            .map(|kind| self.catalog.validation(field, kind))
    }

    pub fn is_field_invalid(&self, field: ProductField) -> bool {
        self.field_error(field).is_some()
    }

    /// Submit the form to the store.
    ///
    /// An invalid or still-validating form is not sent; instead every field is marked
    /// touched so its errors become visible.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.state.submission == Submission::Submitting {
            return SubmitOutcome::Blocked;
        }

        let product = match self.build_product() {
            Some(product) if self.state.is_valid() && !self.state.has_pending_checks() => product,
            _ => {
                self.mark_all_touched();
                tracing::debug!("submit blocked by invalid or pending fields");
                return SubmitOutcome::Blocked;
            }
        };

        self.state.submission = Submission::Submitting;

        let result = match &self.state.mode {
            FormMode::Create => self.store.create(product).await,
            FormMode::Edit(id) => self.store.update(id, product).await,
        };

        match result {
            Ok(saved) => {
                let message = match self.state.mode {
                    FormMode::Create => self.catalog.product_created(),
                    FormMode::Edit(_) => self.catalog.product_updated(),
                };
                tracing::info!(id = %saved.id, mode = ?self.state.mode, "product saved");
                self.state.submission = Submission::Succeeded(message.clone());
                SubmitOutcome::Succeeded {
                    message,
                    navigate: NavigateAway {
                        delay: self.navigate_delay,
                    },
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, mode = ?self.state.mode, "product save failed");
                let message = self.catalog.store_error(&err);
                self.state.submission = Submission::Failed(message.clone());
                SubmitOutcome::Failed { message }
            }
        }
    }

    /// Clear every value and message and return to a pristine form.
    pub fn reset(&mut self) {
        if let Some(checker) = &self.checker {
            checker.cancel();
        }
        for field in ProductField::ALL {
            let state = self.state.field_mut(field);
            state.value.clear();
            state.errors.clear();
            state.touched = false;
            state.async_pending = false;
        }
        self.state.submission = Submission::Idle;
        self.revalidate_all();
    }

    fn schedule_uniqueness_check(&mut self) -> Option<CheckTicket> {
        let checker = self.checker.as_ref()?;
        let id = self.state.field_mut(ProductField::Id);

        // Remote checks only run once the synchronous rules pass.
        if !id.errors.is_empty() {
            checker.cancel();
            id.async_pending = false;
            return None;
        }

        id.async_pending = true;
        Some(checker.begin(id.value.clone()))
    }

    fn mark_all_touched(&mut self) {
        for state in self.state.fields.iter_mut() {
            state.touched = true;
        }
    }

    fn revalidate_all(&mut self) {
        for field in ProductField::ALL {
            self.revalidate(field);
        }
    }

    /// Recompute the synchronous errors of `field`, keeping a committed duplicate verdict.
    fn revalidate(&mut self, field: ProductField) {
        let state = self.state.field(field);
        let errors = if state.disabled {
            ValidationErrors::new()
        } else {
            let mut errors = self.compute_errors(field);
            if state.errors.contains(&ValidationErrorKind::DuplicateId) {
                errors.insert(ValidationErrorKind::DuplicateId);
            }
            errors
        };
        self.state.field_mut(field).errors = errors;
    }

    fn compute_errors(&self, field: ProductField) -> ValidationErrors {
        let value = self.state.value(field);
        let mut errors = rules::validate(field, value);

        match field {
            ProductField::DateRelease => {
                errors.extend(dates::min_date_error(value, self.today));
            }
            ProductField::DateRevision => {
                let release = self.state.value(ProductField::DateRelease);
                errors.extend(dates::revision_error(release, value));
            }
            _ => {}
        }

        errors
    }

    fn build_product(&self) -> Option<Product> {
        let value = |field| self.state.value(field).to_string();
        let id = match &self.state.mode {
            FormMode::Create => value(ProductField::Id),
            FormMode::Edit(id) => id.clone(),
        };

        Some(Product {
            id,
            name: value(ProductField::Name),
            description: value(ProductField::Description),
            logo: value(ProductField::Logo),
            date_release: dates::parse_date(self.state.value(ProductField::DateRelease))?,
            date_revision: dates::parse_date(self.state.value(ProductField::DateRevision))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryProductStore;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn existing() -> Product {
        Product::with_derived_revision(
            "trj-crd",
            "Tarjetas de Credito",
            "Tarjeta de consumo bajo la modalidad de credito",
            "https://example.com/visa.png",
            NaiveDate::from_ymd_opt(2027, 1, 1).unwrap(),
        )
        .unwrap()
    }

    fn setup() -> (Arc<InMemoryProductStore>, ProductFormController<InMemoryProductStore>) {
        let store = Arc::new(InMemoryProductStore::with_products([existing()]));
        let form = ProductFormController::create(store.clone(), &ClientConfig::default())
            .with_today(today());
        (store, form)
    }

    async fn fill_valid(form: &mut ProductFormController<InMemoryProductStore>) {
        form.change(ProductField::Id, "cta-aho").await.unwrap();
        form.change(ProductField::Name, "Cuenta de ahorro").await.unwrap();
        form.change(ProductField::Description, "Cuenta de ahorro con rendimiento")
            .await
            .unwrap();
        form.change(ProductField::Logo, "https://example.com/aho.png").await.unwrap();
        form.change(ProductField::DateRelease, "2026-12-01").await.unwrap();
    }

    #[test]
    fn fresh_create_form_is_pristine_with_latent_errors() {
        let (_, form) = setup();
        assert_eq!(form.phase(), FormPhase::Editing);
        assert!(!form.state().is_valid());
        assert_eq!(form.field_error(ProductField::Id), None);
    }

    #[test]
    fn required_wins_over_other_kinds() {
        let (_, mut form) = setup();
        form.on_field_change(ProductField::Id, "").unwrap();
        assert_eq!(form.field_error(ProductField::Id), Some(ValidationErrorKind::Required));
        assert_eq!(
            form.field_error_message(ProductField::Id).as_deref(),
            Some("ID es requerido!")
        );
    }

    #[test]
    fn short_id_does_not_schedule_a_remote_check() {
        let (_, mut form) = setup();
        let ticket = form.on_field_change(ProductField::Id, "ab").unwrap();
        assert!(ticket.is_none());
        assert!(!form.state().field(ProductField::Id).async_pending);
        assert_eq!(
            form.field_error(ProductField::Id),
            Some(ValidationErrorKind::TooShort { min: 3 })
        );
    }

    #[test]
    fn release_change_overwrites_revision() {
        let (_, mut form) = setup();
        form.on_field_change(ProductField::DateRevision, "2030-01-01").unwrap();
        form.on_field_change(ProductField::DateRelease, "2028-02-29").unwrap();

        assert_eq!(form.state().value(ProductField::DateRevision), "2029-03-01");
        assert!(form.state().field(ProductField::DateRevision).errors.is_empty());
    }

    #[test]
    fn derived_revision_does_not_touch_the_field() {
        let (_, mut form) = setup();
        form.on_field_change(ProductField::DateRelease, "2027-05-10").unwrap();
        assert_eq!(form.state().value(ProductField::DateRevision), "2028-05-10");
        assert!(!form.state().field(ProductField::DateRevision).touched);
    }

    #[test]
    fn diverging_revision_is_flagged() {
        let (_, mut form) = setup();
        form.on_field_change(ProductField::DateRelease, "2027-01-01").unwrap();
        form.on_field_change(ProductField::DateRevision, "2028-01-02").unwrap();
        assert_eq!(
            form.field_error(ProductField::DateRevision),
            Some(ValidationErrorKind::InvalidRevisionDate)
        );
    }

    #[test]
    fn past_release_date_is_rejected() {
        let (_, mut form) = setup();
        form.on_field_change(ProductField::DateRelease, "2026-10-18").unwrap();
        assert_eq!(
            form.field_error(ProductField::DateRelease),
            Some(ValidationErrorKind::MinDate)
        );
        form.on_field_change(ProductField::DateRelease, "2026-10-19").unwrap();
        assert_eq!(form.field_error(ProductField::DateRelease), None);
    }

    #[tokio::test(start_paused = true)]
    async fn duplicate_id_surfaces_after_check() {
        let (_, mut form) = setup();
        form.change(ProductField::Id, "trj-crd").await.unwrap();
        assert_eq!(
            form.field_error(ProductField::Id),
            Some(ValidationErrorKind::DuplicateId)
        );
        assert!(!form.state().field(ProductField::Id).async_pending);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_outcome_is_not_applied() {
        let (_, mut form) = setup();
        let stale = form.on_field_change(ProductField::Id, "trj-crd").unwrap().unwrap();
        let fresh = form.on_field_change(ProductField::Id, "nuevo").unwrap().unwrap();
        let checker = form.uniqueness_checker().unwrap();

        let (stale_outcome, fresh_outcome) = tokio::join!(
            checker.resolve(&stale, None),
            checker.resolve(&fresh, None)
        );
        assert!(!form.apply_uniqueness(&stale, stale_outcome));
        // Even a forged "duplicate" verdict for the stale ticket is ignored.
        assert!(!form.apply_uniqueness(&stale, CheckOutcome::Duplicate));
        assert!(form.state().field(ProductField::Id).async_pending);

        assert!(form.apply_uniqueness(&fresh, fresh_outcome));
        assert!(form.state().field(ProductField::Id).errors.is_empty());
        assert!(!form.state().field(ProductField::Id).async_pending);
    }

    #[tokio::test(start_paused = true)]
    async fn submit_with_pending_check_is_blocked() {
        let (store, mut form) = setup();
        fill_valid(&mut form).await;
        form.on_field_change(ProductField::Id, "otro-id").unwrap();

        assert_eq!(form.phase(), FormPhase::Validating);
        assert_eq!(form.submit().await, SubmitOutcome::Blocked);
        assert_eq!(store.calls().create, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn submit_invalid_form_touches_everything_and_skips_store() {
        let (store, mut form) = setup();
        form.change(ProductField::Name, "Cuenta de ahorro").await.unwrap();

        assert_eq!(form.submit().await, SubmitOutcome::Blocked);
        assert_eq!(store.calls().create, 0);
        assert_eq!(store.calls().update, 0);
        for field in ProductField::ALL {
            assert!(form.state().field(field).touched, "{field} not touched");
        }
        assert_eq!(form.field_error(ProductField::Logo), Some(ValidationErrorKind::Required));
    }

    #[tokio::test(start_paused = true)]
    async fn successful_create_signals_navigation() {
        let (store, mut form) = setup();
        fill_valid(&mut form).await;
        assert_eq!(form.phase(), FormPhase::Submittable);

        let outcome = form.submit().await;
        let SubmitOutcome::Succeeded { message, navigate } = outcome else {
            panic!("expected success, got {outcome:?}");
        };
        assert_eq!(message, "Producto creado exitosamente");
        assert_eq!(navigate.delay, Duration::from_millis(1500));
        assert_eq!(form.phase(), FormPhase::Succeeded);

        let saved = store.snapshot();
        assert_eq!(saved.len(), 2);
        assert_eq!(
            saved[1].date_revision,
            NaiveDate::from_ymd_opt(2027, 12, 1).unwrap()
        );

        let started = tokio::time::Instant::now();
        navigate.wait().await;
        assert!(started.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_submit_keeps_input_and_is_retryable() {
        let (store, mut form) = setup();
        fill_valid(&mut form).await;
        store.fail_with(Some(StoreError::server(400, Some("Invalid body".into()))));

        let outcome = form.submit().await;
        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                message: "Invalid body".into()
            }
        );
        assert_eq!(form.state().submission, Submission::Failed("Invalid body".into()));
        assert_eq!(form.state().value(ProductField::Name), "Cuenta de ahorro");
        assert_eq!(form.phase(), FormPhase::Submittable);

        store.fail_with(None);
        assert!(matches!(form.submit().await, SubmitOutcome::Succeeded { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn reset_returns_to_pristine_and_drops_pending_checks() {
        let (_, mut form) = setup();
        fill_valid(&mut form).await;
        let ticket = form.on_field_change(ProductField::Id, "trj-crd").unwrap().unwrap();

        form.reset();
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(form.state().value(ProductField::Name), "");
        assert_eq!(form.state().submission, Submission::Idle);
        assert!(!form.apply_uniqueness(&ticket, CheckOutcome::Duplicate));
    }

    #[test]
    fn edit_mode_prefills_and_locks_id() {
        let store = Arc::new(InMemoryProductStore::new());
        let form = ProductFormController::edit(
            store,
            &ClientConfig::default(),
            &[existing()],
            "trj-crd",
        )
        .unwrap()
        .with_today(today());

        assert!(form.is_edit_mode());
        assert!(form.uniqueness_checker().is_none());
        assert_eq!(form.state().value(ProductField::Name), "Tarjetas de Credito");
        assert_eq!(form.state().value(ProductField::DateRevision), "2028-01-01");
        assert!(form.state().is_valid());
    }

    #[test]
    fn edit_mode_rejects_id_changes() {
        let store = Arc::new(InMemoryProductStore::new());
        let mut form =
            ProductFormController::edit(store, &ClientConfig::default(), &[existing()], "trj-crd")
                .unwrap();
        assert_eq!(
            form.on_field_change(ProductField::Id, "otro"),
            Err(FormError::FieldDisabled(ProductField::Id))
        );
    }

    #[test]
    fn edit_of_unknown_product_is_not_found() {
        let store = Arc::new(InMemoryProductStore::new());
        let err = ProductFormController::edit(store, &ClientConfig::default(), &[], "missing")
            .err()
            .unwrap();
        assert_eq!(err, FormError::NotFound("missing".into()));
    }

    #[tokio::test]
    async fn edit_submit_updates_without_uniqueness_check() {
        let store = Arc::new(InMemoryProductStore::with_products([existing()]));
        let mut form =
            ProductFormController::edit_from_store(store.clone(), &ClientConfig::default(), "trj-crd")
                .await
                .unwrap()
                .with_today(today());

        form.change(ProductField::Name, "Tarjeta Platinum").await.unwrap();
        let outcome = form.submit().await;

        assert!(matches!(outcome, SubmitOutcome::Succeeded { ref message, .. } if message == "Producto actualizado exitosamente"));
        assert_eq!(store.calls().verify_exists, 0);
        assert_eq!(store.calls().update, 1);
        assert_eq!(store.snapshot()[0].name, "Tarjeta Platinum");
    }

    #[tokio::test]
    async fn edit_from_store_propagates_load_failure() {
        let store = Arc::new(InMemoryProductStore::new());
        store.fail_with(Some(StoreError::network("down")));
        let err = ProductFormController::edit_from_store(store, &ClientConfig::default(), "x")
            .await
            .err()
            .unwrap();
        assert_eq!(err, FormError::Store(StoreError::network("down")));
    }
}
