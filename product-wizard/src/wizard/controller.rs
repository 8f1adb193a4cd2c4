//! Wizard controller
//!
//! Owns the draft aggregate for one wizard session and drives the step
//! machine: per-step validity, forward/backward navigation, explicit
//! variant generation, and submission through the external sink.
//!
//! All mutations are synchronous; only reference-data loading and
//! submission cross an async boundary.

use shared::models::{
    CatalogAttribute, CategoryOption, ProductDetail, ProductSubmission, SubmissionError,
    SubmissionVariant, VariantDraft,
};
use shared::{AppError, AppResult, ErrorCode};
use tracing::{debug, info, warn};

use crate::catalog::{CategoryPathResolver, normalize};
use crate::sources::{AttributeSource, CategorySource, SubmissionSink};
use crate::spec::{AddValueOutcome, AttributeSelectionStore, can_generate, generate};
use crate::wizard::step::WizardStep;
use crate::wizard::validation::{parse_price, validate_basic_info, validate_variant_rows};

/// Basic Info step data
#[derive(Debug, Clone, Default)]
pub struct BasicInfo {
    pub name: String,
    pub description: String,
    pub category_id: Option<i64>,
}

/// Specification step data
#[derive(Debug, Clone, Default)]
pub struct Specifications {
    /// Whether this product varies by attributes at all
    pub is_variable: bool,
    pub store: AttributeSelectionStore,
}

/// The aggregate draft for one product
#[derive(Debug, Clone, Default)]
pub struct WizardFormData {
    pub basic_info: BasicInfo,
    pub specifications: Specifications,
    pub variants: Vec<VariantDraft>,
}

/// One wizard session
///
/// Exclusively owns its [`WizardFormData`]; dropping the controller
/// discards the draft with no cleanup obligations.
#[derive(Debug, Default)]
pub struct WizardController {
    step: WizardStep,
    form: WizardFormData,
    catalog_attributes: Vec<CatalogAttribute>,
    resolver: CategoryPathResolver,
    category_path: Vec<i64>,
    /// Set on any attribute/value mutation, cleared by generate
    dirty: bool,
    /// Re-entrant submission guard
    submitting: bool,
    last_submission_error: Option<SubmissionError>,
}

impl WizardController {
    /// Fresh draft (create mode)
    pub fn new() -> Self {
        Self {
            dirty: true,
            ..Self::default()
        }
    }

    /// Seed the draft from an existing product (edit mode). The loaded
    /// variants already match the loaded value lists, so the draft starts
    /// clean; the category path is resolved on [`Self::load_reference_data`].
    pub fn from_existing(detail: ProductDetail) -> Self {
        let mut store = AttributeSelectionStore::new();
        let is_variable = !detail.attributes.is_empty();
        store.seed(detail.attributes);

        Self {
            step: WizardStep::BasicInfo,
            form: WizardFormData {
                basic_info: BasicInfo {
                    name: detail.name,
                    description: detail.description,
                    category_id: detail.category_id,
                },
                specifications: Specifications { is_variable, store },
                variants: detail.variants,
            },
            dirty: false,
            ..Self::default()
        }
    }

    // ========== Reference data ==========

    /// Load categories and catalog attributes from the external sources.
    ///
    /// A failed or malformed load degrades to empty lists: dependent
    /// option lists stay empty, which is a legitimate transient state,
    /// never a validation failure.
    pub async fn load_reference_data(
        &mut self,
        categories: &dyn CategorySource,
        attributes: &dyn AttributeSource,
    ) {
        let category_list = match categories.fetch_categories().await {
            Ok(payload) => normalize(payload),
            Err(e) => {
                warn!(error = %e, "Category load failed, continuing with empty catalog");
                Vec::new()
            }
        };
        info!(count = category_list.len(), "Categories loaded");
        self.resolver = CategoryPathResolver::new(category_list);

        // Re-resolve the selected category against the fresh catalog
        if let Some(id) = self.form.basic_info.category_id {
            if self.resolver.contains(id) {
                self.category_path = self.resolver.path_to(id);
            } else {
                warn!(id, "Selected category no longer resolvable, clearing");
                self.form.basic_info.category_id = None;
                self.category_path.clear();
            }
        }

        self.catalog_attributes = match attributes.fetch_attributes().await {
            Ok(list) => list,
            Err(e) => {
                warn!(error = %e, "Attribute load failed, continuing with empty catalog");
                Vec::new()
            }
        };
        info!(count = self.catalog_attributes.len(), "Catalog attributes loaded");
    }

    pub fn catalog_attributes(&self) -> &[CatalogAttribute] {
        &self.catalog_attributes
    }

    // ========== Basic Info ==========

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.form.basic_info.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.form.basic_info.description = description.into();
    }

    /// Per-stage category options for the current path
    pub fn category_stages(&self) -> Vec<Vec<CategoryOption>> {
        self.resolver.stages(&self.category_path)
    }

    /// Apply a category selection at `stage`; `None` means "use the
    /// parent category" (or no category at stage 0).
    pub fn select_category(&mut self, stage: usize, choice: Option<i64>) {
        let selection = self.resolver.select(&self.category_path, stage, choice);
        self.category_path = selection.path;
        self.form.basic_info.category_id = selection.category_id;
    }

    // ========== Specification ==========

    pub fn set_variable(&mut self, is_variable: bool) {
        if self.form.specifications.is_variable != is_variable {
            self.form.specifications.is_variable = is_variable;
            self.dirty = true;
        }
    }

    /// Toggle an attribute by catalog id; unknown ids are ignored
    pub fn toggle_attribute(&mut self, attribute_id: i64, active: bool) {
        let Some(attribute) = self
            .catalog_attributes
            .iter()
            .find(|a| a.id == attribute_id)
            .cloned()
        else {
            warn!(attribute_id, "Toggle for unknown catalog attribute ignored");
            return;
        };
        if self.form.specifications.store.is_active(attribute_id) != active {
            self.form.specifications.store.toggle_attribute(&attribute, active);
            self.dirty = true;
        }
    }

    pub fn add_value(&mut self, attribute_id: i64, raw_value: &str) -> AddValueOutcome {
        let outcome = self.form.specifications.store.add_value(attribute_id, raw_value);
        if outcome == AddValueOutcome::Added {
            self.dirty = true;
        }
        outcome
    }

    pub fn remove_value(&mut self, attribute_id: i64, value: &str) -> bool {
        let removed = self.form.specifications.store.remove_value(attribute_id, value);
        if removed {
            self.dirty = true;
        }
        removed
    }

    /// Whether the generate action is currently permitted
    pub fn can_generate(&self) -> bool {
        self.form.specifications.is_variable && can_generate(self.form.specifications.store.active())
    }

    /// Generate/regenerate the variant list. Explicit, user-initiated:
    /// never triggered by attribute or value mutations.
    pub fn generate(&mut self) -> AppResult<usize> {
        if !self.can_generate() {
            return Err(AppError::new(ErrorCode::GenerationNotAllowed)
                .with_detail("is_variable", self.form.specifications.is_variable)
                .with_detail(
                    "active_attributes",
                    self.form.specifications.store.active().len() as i64,
                ));
        }
        let active = self.form.specifications.store.active();
        self.form.variants = generate(active, &self.form.variants);
        self.dirty = false;
        info!(count = self.form.variants.len(), "Variants generated");
        Ok(self.form.variants.len())
    }

    // ========== Variants ==========

    pub fn edit_variant_sku(&mut self, key: &str, sku: impl Into<String>) -> bool {
        match self.form.variants.iter_mut().find(|v| v.key == key) {
            Some(variant) => {
                variant.sku = sku.into();
                true
            }
            None => false,
        }
    }

    pub fn edit_variant_price(&mut self, key: &str, price: impl Into<String>) -> bool {
        match self.form.variants.iter_mut().find(|v| v.key == key) {
            Some(variant) => {
                variant.price = price.into();
                true
            }
            None => false,
        }
    }

    // ========== Step machine ==========

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn progress(&self) -> u8 {
        self.step.progress_percent()
    }

    pub fn form(&self) -> &WizardFormData {
        &self.form
    }

    /// Per-step validity predicate. Failures are field-keyed and block
    /// forward navigation only; the draft is never touched.
    pub fn validate_step(&self, step: WizardStep) -> AppResult<()> {
        match step {
            WizardStep::BasicInfo => {
                validate_basic_info(&self.form.basic_info.name, &self.form.basic_info.description)
            }
            WizardStep::Specification => {
                if !self.form.specifications.is_variable {
                    return Ok(());
                }
                if self.form.specifications.store.active().is_empty() {
                    return Err(AppError::validation("No attribute is active")
                        .with_detail("attributes", "Activate at least one attribute"));
                }
                if self.dirty {
                    return Err(AppError::new(ErrorCode::VariantsStale)
                        .with_detail("variants", "Generate variants before continuing"));
                }
                Ok(())
            }
            WizardStep::Variants => {
                if !self.form.specifications.is_variable {
                    return Ok(());
                }
                validate_variant_rows(&self.form.variants)
            }
            // No further condition beyond all prior steps remaining valid
            WizardStep::Preview => {
                self.validate_step(WizardStep::BasicInfo)?;
                self.validate_step(WizardStep::Specification)?;
                self.validate_step(WizardStep::Variants)
            }
        }
    }

    pub fn is_step_valid(&self, step: WizardStep) -> bool {
        self.validate_step(step).is_ok()
    }

    /// Advance one step; gated by the current step's validity
    pub fn try_next(&mut self) -> AppResult<WizardStep> {
        self.validate_step(self.step).map_err(|e| {
            debug!(step = ?self.step, error = %e, "Forward navigation blocked");
            AppError::step_blocked(e.message.clone()).with_detail(
                "step",
                serde_json::to_value(self.step).unwrap_or_default(),
            )
        })?;
        match self.step.next() {
            Some(next) => {
                self.step = next;
                Ok(next)
            }
            None => Err(AppError::invalid_request("Already at the final step")),
        }
    }

    /// Go back one step. Always permitted, regardless of validity.
    pub fn back(&mut self) -> WizardStep {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
        self.step
    }

    // ========== Submission ==========

    pub fn submission_in_flight(&self) -> bool {
        self.submitting
    }

    /// Structured error from the last failed submission, for the Preview
    /// step to render
    pub fn last_submission_error(&self) -> Option<&SubmissionError> {
        self.last_submission_error.as_ref()
    }

    /// Assemble the final payload from the draft
    pub fn build_submission(&self) -> AppResult<ProductSubmission> {
        let specifications = &self.form.specifications;
        let mut variants = Vec::new();

        if specifications.is_variable {
            for variant in &self.form.variants {
                let price = parse_price(&variant.price).ok_or_else(|| {
                    AppError::validation(format!("Variant {} has an invalid price", variant.key))
                        .with_detail("price", variant.price.clone())
                })?;
                let mut attribute_value_ids = Vec::with_capacity(variant.options.len());
                for option in &variant.options {
                    let value_id = specifications
                        .store
                        .value_id(option.attribute_id, &option.value)
                        .ok_or_else(|| {
                            // A generated draft always came from interned values
                            AppError::internal(format!(
                                "No value id for {}:{}",
                                option.attribute_id, option.value
                            ))
                        })?;
                    attribute_value_ids.push(value_id);
                }
                variants.push(SubmissionVariant {
                    sku: variant.sku.trim().to_string(),
                    price,
                    attribute_value_ids,
                });
            }
        }

        Ok(ProductSubmission {
            name: self.form.basic_info.name.trim().to_string(),
            description: self.form.basic_info.description.clone(),
            category_id: self.form.basic_info.category_id,
            attributes: if specifications.is_variable {
                specifications.store.active_ids()
            } else {
                Vec::new()
            },
            variants,
        })
    }

    /// Submit the draft through the sink.
    ///
    /// Double-submit is gated by the in-flight flag: while a prior
    /// submission is unresolved the sink is never invoked again. A
    /// rejection returns control to the Preview step with the structured
    /// error surfaced; the draft is left intact for retry.
    pub async fn submit(&mut self, sink: &dyn SubmissionSink) -> AppResult<()> {
        if self.submitting {
            return Err(AppError::new(ErrorCode::SubmissionInFlight));
        }
        if self.step != WizardStep::Preview {
            return Err(AppError::invalid_request("Submit is only available from Preview"));
        }
        self.validate_step(WizardStep::Preview)?;
        let payload = self.build_submission()?;

        self.submitting = true;
        info!(
            name = %payload.name,
            variants = payload.variants.len(),
            "Submitting product"
        );
        let result = sink.submit_product(&payload).await;
        self.submitting = false;

        match result {
            Ok(()) => {
                self.last_submission_error = None;
                info!(name = %payload.name, "Product submitted");
                Ok(())
            }
            Err(submission_error) => {
                warn!(
                    fields = submission_error.field_errors.len(),
                    message = ?submission_error.message,
                    "Submission rejected"
                );
                let mut err = AppError::new(ErrorCode::SubmissionRejected);
                if let Some(message) = &submission_error.message {
                    err.message = message.clone();
                }
                for (field, message) in &submission_error.field_errors {
                    err = err.with_detail(field.clone(), message.clone());
                }
                self.last_submission_error = Some(submission_error);
                self.step = WizardStep::Preview;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Sink that counts invocations and answers from a scripted queue
    #[derive(Default)]
    struct ScriptedSink {
        calls: Mutex<usize>,
        rejections: Mutex<Vec<SubmissionError>>,
    }

    impl ScriptedSink {
        fn rejecting(error: SubmissionError) -> Self {
            Self {
                calls: Mutex::new(0),
                rejections: Mutex::new(vec![error]),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl SubmissionSink for ScriptedSink {
        async fn submit_product(&self, _payload: &ProductSubmission) -> Result<(), SubmissionError> {
            *self.calls.lock().unwrap() += 1;
            match self.rejections.lock().unwrap().pop() {
                Some(error) => Err(error),
                None => Ok(()),
            }
        }
    }

    fn catalog() -> Vec<CatalogAttribute> {
        vec![
            CatalogAttribute { id: 1, name: "Color".to_string() },
            CatalogAttribute { id: 2, name: "Size".to_string() },
        ]
    }

    /// Controller with a loaded attribute catalog and a valid Basic Info
    fn ready_controller() -> WizardController {
        let mut c = WizardController::new();
        c.catalog_attributes = catalog();
        c.set_name("Crew T-Shirt");
        c.set_description("Plain crew-neck tee");
        c
    }

    /// Drive a variable product to the Preview step with filled variants
    fn controller_at_preview() -> WizardController {
        let mut c = ready_controller();
        c.set_variable(true);
        c.toggle_attribute(1, true);
        c.toggle_attribute(2, true);
        c.add_value(1, "Red");
        c.add_value(1, "Blue");
        c.add_value(2, "S");
        c.add_value(2, "M");
        c.add_value(2, "L");
        c.generate().unwrap();
        for (i, key) in c.form().variants.iter().map(|v| v.key.clone()).collect::<Vec<_>>().into_iter().enumerate() {
            c.edit_variant_sku(&key, format!("TS-{i:03}"));
            c.edit_variant_price(&key, "14.90");
        }
        c.try_next().unwrap();
        c.try_next().unwrap();
        c.try_next().unwrap();
        assert_eq!(c.step(), WizardStep::Preview);
        c
    }

    #[test]
    fn test_basic_info_gates_first_step() {
        let mut c = WizardController::new();
        let err = c.try_next().unwrap_err();
        assert_eq!(err.code, ErrorCode::StepBlocked);

        c.set_name("Crew T-Shirt");
        assert_eq!(c.try_next().unwrap(), WizardStep::Specification);
    }

    #[test]
    fn test_simple_product_skips_spec_requirements() {
        let mut c = ready_controller();
        c.set_variable(false);
        c.try_next().unwrap();
        assert_eq!(c.try_next().unwrap(), WizardStep::Variants);
        assert_eq!(c.try_next().unwrap(), WizardStep::Preview);
    }

    #[test]
    fn test_specification_requires_generate_after_changes() {
        let mut c = ready_controller();
        c.set_variable(true);
        c.toggle_attribute(1, true);
        c.add_value(1, "Red");
        c.try_next().unwrap();

        // Value added but not yet generated
        let err = c.try_next().unwrap_err();
        assert_eq!(err.code, ErrorCode::StepBlocked);

        c.generate().unwrap();
        assert_eq!(c.try_next().unwrap(), WizardStep::Variants);

        // Any further mutation makes the step stale again
        c.back();
        c.add_value(1, "Blue");
        assert!(c.try_next().is_err());
        c.generate().unwrap();
        assert!(c.try_next().is_ok());
    }

    #[test]
    fn test_noop_mutations_do_not_dirty() {
        let mut c = ready_controller();
        c.set_variable(true);
        c.toggle_attribute(1, true);
        c.add_value(1, "Red");
        c.generate().unwrap();
        assert!(c.is_step_valid(WizardStep::Specification));

        c.add_value(1, "Red"); // duplicate
        c.add_value(1, "  "); // empty
        c.remove_value(1, "Green"); // absent
        c.toggle_attribute(1, true); // already active
        c.toggle_attribute(99, true); // unknown catalog id
        assert!(c.is_step_valid(WizardStep::Specification));
    }

    #[test]
    fn test_generate_gate() {
        let mut c = ready_controller();
        c.set_variable(true);
        c.toggle_attribute(1, true);
        // Active attribute with zero values
        let err = c.generate().unwrap_err();
        assert_eq!(err.code, ErrorCode::GenerationNotAllowed);
        assert!(!c.can_generate());

        c.add_value(1, "Red");
        assert!(c.can_generate());
        assert_eq!(c.generate().unwrap(), 1);
    }

    #[test]
    fn test_variants_step_requires_sku_and_price() {
        let mut c = ready_controller();
        c.set_variable(true);
        c.toggle_attribute(1, true);
        c.add_value(1, "Red");
        c.generate().unwrap();
        c.try_next().unwrap();
        c.try_next().unwrap();
        assert_eq!(c.step(), WizardStep::Variants);

        // Fresh draft: empty sku
        assert!(c.try_next().is_err());
        c.edit_variant_sku("1:Red", "RED-001");
        c.edit_variant_price("1:Red", "not a price");
        assert!(c.try_next().is_err());
        c.edit_variant_price("1:Red", "9.99");
        assert_eq!(c.try_next().unwrap(), WizardStep::Preview);
    }

    #[test]
    fn test_back_is_always_permitted() {
        let mut c = WizardController::new();
        // Invalid draft, still allowed to go back (and clamp at the start)
        assert_eq!(c.back(), WizardStep::BasicInfo);

        c.set_name("Crew T-Shirt");
        c.try_next().unwrap();
        c.set_name(""); // now invalid
        assert_eq!(c.back(), WizardStep::BasicInfo);
    }

    #[test]
    fn test_end_to_end_example_cardinality() {
        let c = controller_at_preview();
        // Color x Size = 2 x 3
        assert_eq!(c.form().variants.len(), 6);
        assert_eq!(c.form().variants[0].key, "1:Red|2:S");
        assert_eq!(c.progress(), 100);
    }

    #[test]
    fn test_build_submission_payload() {
        let c = controller_at_preview();
        let payload = c.build_submission().unwrap();
        assert_eq!(payload.name, "Crew T-Shirt");
        assert_eq!(payload.attributes, vec![1, 2]);
        assert_eq!(payload.variants.len(), 6);
        for variant in &payload.variants {
            assert_eq!(variant.attribute_value_ids.len(), 2);
            assert!(!variant.sku.is_empty());
        }
        // Value ids are draft-locally unique per (attribute, value)
        let first = &payload.variants[0];
        let last = &payload.variants[5];
        assert_ne!(first.attribute_value_ids, last.attribute_value_ids);
    }

    #[tokio::test]
    async fn test_double_submit_guard() {
        let mut c = controller_at_preview();
        c.submitting = true;

        let sink = ScriptedSink::default();
        let err = c.submit(&sink).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SubmissionInFlight);
        // The sink was never invoked a second time
        assert_eq!(sink.calls(), 0);
    }

    #[tokio::test]
    async fn test_submission_failure_keeps_draft_and_allows_retry() {
        let mut c = controller_at_preview();
        let variants_before = c.form().variants.clone();

        let sink = ScriptedSink::rejecting(
            SubmissionError::with_message("duplicate sku").with_field("variants[0].sku", "taken"),
        );
        let err = c.submit(&sink).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SubmissionRejected);
        assert_eq!(err.message, "duplicate sku");

        // Control returns to Preview, draft intact, error surfaced
        assert_eq!(c.step(), WizardStep::Preview);
        assert_eq!(c.form().variants, variants_before);
        assert!(c.last_submission_error().is_some());
        assert!(!c.submission_in_flight());

        // Retry succeeds and clears the surfaced error
        c.submit(&sink).await.unwrap();
        assert_eq!(sink.calls(), 2);
        assert!(c.last_submission_error().is_none());
    }

    #[tokio::test]
    async fn test_submit_requires_preview_step() {
        let mut c = ready_controller();
        let sink = ScriptedSink::default();
        let err = c.submit(&sink).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRequest);
        assert_eq!(sink.calls(), 0);
    }
}
