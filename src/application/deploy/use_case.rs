//! Deploy Use Case
//!
//! Orchestrates the deployment flow:
//! 1. Read the app manifest and locate the release binary
//! 2. Fingerprint the binary
//! 3. Ensure the artifact bucket exists and publish the archive if absent
//! 4. Render the stack template around the published location
//! 5. Reconcile the stack and report its endpoint
//!
//! Fails fast on the first error. Nothing is rolled back locally; a failed
//! create or update is rolled back by the provider itself.

use std::fs;
use std::sync::Arc;

use crate::domain::entities::AppManifest;
use crate::domain::ports::{
    Clock, DeployEvent, DeployEventSink, IdentityProvider, NetworkDirectory, NoopEventSink,
    ObjectStore, Packager, StackService,
};
use crate::domain::services::{
    ArtifactStore, BucketStatus, ContentFingerprinter, EnvironmentReconciler, TemplateBuilder,
};
use crate::domain::value_objects::StoreLocation;
use crate::error::{DeployError, DeployResult};
use crate::infrastructure::manifest::{locate_artifact, read_manifest};

use super::options::DeployOptions;
use super::result::DeployReport;

/// Deploy use case - orchestrates the deployment flow
///
/// Parameterized by every control-plane port so tests can drive the whole
/// pipeline against in-memory fakes.
pub struct DeployUseCase<I, O, N, S, P, C>
where
    I: IdentityProvider,
    O: ObjectStore,
    N: NetworkDirectory,
    S: StackService,
    P: Packager,
    C: Clock,
{
    identity: I,
    objects: O,
    network: N,
    stacks: S,
    packager: P,
    clock: C,
    fingerprinter: ContentFingerprinter,
}

impl<I, O, N, S, P, C> DeployUseCase<I, O, N, S, P, C>
where
    I: IdentityProvider,
    O: ObjectStore,
    N: NetworkDirectory,
    S: StackService,
    P: Packager,
    C: Clock,
{
    pub fn new(identity: I, objects: O, network: N, stacks: S, packager: P, clock: C) -> Self {
        Self {
            identity,
            objects,
            network,
            stacks,
            packager,
            clock,
            fingerprinter: ContentFingerprinter::default(),
        }
    }

    pub fn with_fingerprinter(mut self, fingerprinter: ContentFingerprinter) -> Self {
        self.fingerprinter = fingerprinter;
        self
    }

    /// Execute the deploy use case silently
    pub fn execute(&self, options: &DeployOptions) -> DeployResult<DeployReport> {
        self.execute_with_events(options, Arc::new(NoopEventSink))
    }

    /// Execute the deploy use case with event reporting
    ///
    /// A failing run emits `DeployEvent::Failed` before returning the error.
    pub fn execute_with_events(
        &self,
        options: &DeployOptions,
        events: Arc<dyn DeployEventSink>,
    ) -> DeployResult<DeployReport> {
        let result = self.run(options, &events);
        if let Err(err) = &result {
            events.on_event(DeployEvent::Failed {
                message: err.to_string(),
                phase: err.phase().map(|phase| phase.as_str().to_string()),
            });
        }
        result
    }

    fn run(
        &self,
        options: &DeployOptions,
        events: &Arc<dyn DeployEventSink>,
    ) -> DeployResult<DeployReport> {
        let manifest = read_manifest(options.app_path())?;
        let stack_name = options.resolve_stack_name(&manifest.name);
        events.on_event(DeployEvent::Started {
            app_path: options.app_path.clone(),
            app_name: manifest.name.clone(),
            stack_name: stack_name.clone(),
        });

        let artifact = locate_artifact(
            options.app_path(),
            &manifest,
            &options.build_target,
            options.artifact.as_deref(),
        )?;
        let digest = self.fingerprinter.fingerprint(&artifact)?;
        events.on_event(DeployEvent::Fingerprinted {
            artifact: artifact.path().to_path_buf(),
            digest: digest.clone(),
            size: artifact.size(),
        });

        let account_id = self.identity.account_id().map_err(DeployError::Identity)?;
        events.on_event(DeployEvent::AccountResolved {
            account_id: account_id.clone(),
        });

        let store = ArtifactStore::new(&self.objects, options.region.clone());
        let bucket = store.ensure_bucket_exists(&account_id, &manifest.name)?;
        events.on_event(match &bucket {
            BucketStatus::Created(name) => DeployEvent::BucketCreated {
                bucket: name.clone(),
                region: options.region.clone(),
            },
            BucketStatus::Existing(name) => DeployEvent::BucketReady {
                bucket: name.clone(),
            },
        });

        let publication =
            store.publish_if_absent(bucket.name(), &digest, &artifact, &self.packager)?;
        events.on_event(if publication.uploaded {
            DeployEvent::Uploaded {
                location: publication.location.clone(),
            }
        } else {
            DeployEvent::UploadSkipped {
                location: publication.location.clone(),
            }
        });

        let body = self.render_template(&manifest, &publication.location, options, events)?;

        let reconciler = EnvironmentReconciler::new(&self.stacks, &self.clock, Arc::clone(events))
            .with_policy(options.poll_policy.clone());
        let outcome = reconciler.reconcile(&stack_name, &body)?;

        events.on_event(DeployEvent::Completed {
            stack_name: outcome.stack_name.clone(),
            convergence: outcome.convergence,
            url: outcome.url(),
        });

        Ok(DeployReport {
            app_name: manifest.name,
            location: publication.location,
            bucket_created: matches!(bucket, BucketStatus::Created(_)),
            uploaded: publication.uploaded,
            template_path: options.template_out.clone(),
            outcome,
        })
    }

    /// Build, optionally write, and validate the stack template
    fn render_template(
        &self,
        manifest: &AppManifest,
        location: &StoreLocation,
        options: &DeployOptions,
        events: &Arc<dyn DeployEventSink>,
    ) -> DeployResult<String> {
        let subnets = self
            .network
            .subnet_ids()
            .map_err(|e| DeployError::control_plane("describe-subnets", e))?;

        let template = TemplateBuilder::new(&manifest.name, location.clone())
            .subnets(subnets)
            .runtime(&options.runtime)
            .build()?;
        let body = template.to_json();

        if let Some(path) = &options.template_out {
            fs::write(path, &body).map_err(|e| DeployError::io(path, e))?;
        }
        events.on_event(DeployEvent::TemplateRendered {
            path: options.template_out.clone(),
            bytes: body.len(),
        });

        self.stacks
            .validate_template(&body)
            .map_err(|e| DeployError::Template(format!("validation failed: {}", e)))?;
        events.on_event(DeployEvent::TemplateValidated);

        Ok(body)
    }
}
