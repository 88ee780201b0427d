//! AWS Systems Manager Parameter Store backend.
//!
//! Credentials and region come from the named profile in the shared AWS
//! config (`~/.aws/config`, `~/.aws/credentials`) or the usual environment
//! variables. The SDK is async; every call is driven to completion on a
//! private current-thread runtime so callers stay synchronous.

use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_ssm::error::{DisplayErrorContext, SdkError};
use aws_sdk_ssm::operation::get_parameter::GetParameterError;
use aws_sdk_ssm::operation::put_parameter::PutParameterError;
use aws_sdk_ssm::types::{ParameterMetadata, ParameterStringFilter};
use aws_sdk_ssm::Client;
use tokio::runtime::Runtime;
use tracing::{debug, trace};

use super::{ParameterStore, StoreResult};
use crate::core::domain::{Parameter, ParameterSummary, ParameterType, PutParameter};
use crate::error::{ConfigError, StoreError};

/// Parameter store backed by AWS SSM.
pub struct Ssm {
    client: Client,
    runtime: Runtime,
    profile: String,
}

impl Ssm {
    /// Load the AWS config for `profile` and build a client.
    ///
    /// `region` overrides the profile's region when given.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` if the runtime cannot start, the resolved
    /// config has no region, or no credentials can be loaded for the
    /// profile. Credentials are resolved here, before any parameter call.
    pub fn connect(profile: &str, region: Option<&str>) -> Result<Self, ConfigError> {
        let load_error = |reason: String| ConfigError::Load {
            profile: profile.to_string(),
            reason,
        };

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| load_error(format!("failed to create runtime: {}", e)))?;

        debug!(profile, region, "loading AWS config");
        let config = runtime.block_on(async {
            let mut loader =
                aws_config::defaults(aws_config::BehaviorVersion::latest()).profile_name(profile);
            if let Some(region) = region {
                loader = loader.region(aws_config::Region::new(region.to_string()));
            }
            let config = loader.load().await;

            if config.region().is_none() {
                return Err(load_error("no region configured".to_string()));
            }
            let provider = config
                .credentials_provider()
                .ok_or_else(|| load_error("no credentials provider".to_string()))?;
            provider
                .provide_credentials()
                .await
                .map_err(|e| load_error(DisplayErrorContext(&e).to_string()))?;

            debug!(profile, "credentials loaded");
            Ok::<_, ConfigError>(config)
        })?;

        Ok(Self {
            client: Client::new(&config),
            runtime,
            profile: profile.to_string(),
        })
    }

    /// Profile this client was built from.
    pub fn profile(&self) -> &str {
        &self.profile
    }
}

impl ParameterStore for Ssm {
    fn list_all(&self) -> StoreResult<Vec<ParameterSummary>> {
        self.runtime.block_on(async {
            let mut pages = self.client.describe_parameters().into_paginator().send();
            let mut summaries = Vec::new();

            while let Some(page) = pages.next().await {
                let page = page.map_err(transport)?;
                trace!(count = page.parameters().len(), "fetched parameter page");
                for meta in page.parameters() {
                    summaries.push(summary_from(meta)?);
                }
            }

            debug!(count = summaries.len(), "listed parameters");
            Ok::<_, StoreError>(summaries)
        })
    }

    fn get_by_name(&self, name: &str, decrypt: bool) -> StoreResult<Parameter> {
        trace!(name, decrypt, "get parameter");
        self.runtime.block_on(async {
            let output = self
                .client
                .get_parameter()
                .name(name)
                .with_decryption(decrypt)
                .send()
                .await
                .map_err(|e| get_error(name, e))?;

            let param = output.parameter().ok_or_else(|| missing(name, "parameter"))?;
            let value = param.value().ok_or_else(|| missing(name, "value"))?;
            let kind = param
                .r#type()
                .ok_or_else(|| missing(name, "type"))
                .and_then(|kind| parse_type(name, kind))?;

            Ok::<_, StoreError>(Parameter::new(
                param.name().unwrap_or(name),
                value,
                kind,
                None,
            ))
        })
    }

    fn describe_by_name(&self, name: &str) -> StoreResult<Vec<ParameterSummary>> {
        trace!(name, "describe parameter");
        let filter = name_filter(name)?;

        self.runtime.block_on(async {
            let output = self
                .client
                .describe_parameters()
                .parameter_filters(filter)
                .send()
                .await
                .map_err(transport)?;

            output
                .parameters()
                .iter()
                .map(summary_from)
                .collect::<StoreResult<Vec<_>>>()
        })
    }

    fn put(&self, request: &PutParameter<'_>) -> StoreResult<()> {
        trace!(
            name = request.name,
            kind = %request.kind,
            overwrite = request.overwrite,
            "put parameter"
        );
        let description =
            (!request.description.is_empty()).then(|| request.description.to_string());

        self.runtime.block_on(async {
            self.client
                .put_parameter()
                .name(request.name)
                .value(request.value)
                .r#type(aws_sdk_ssm::types::ParameterType::from(request.kind.as_str()))
                .set_description(description)
                .overwrite(request.overwrite)
                .send()
                .await
                .map_err(put_error)?;
            Ok::<_, StoreError>(())
        })
    }
}

fn transport<E, R>(err: SdkError<E, R>) -> StoreError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    StoreError::Transport(DisplayErrorContext(&err).to_string())
}

/// `ParameterNotFound` becomes `NotFound`; anything else is a transport error.
fn get_error<R: std::fmt::Debug>(name: &str, err: SdkError<GetParameterError, R>) -> StoreError {
    let not_found = err
        .as_service_error()
        .map(GetParameterError::is_parameter_not_found)
        .unwrap_or(false);
    if not_found {
        StoreError::NotFound(name.to_string())
    } else {
        transport(err)
    }
}

/// The service answered and said no (exists, access denied, bad type...).
fn put_error<R: std::fmt::Debug>(err: SdkError<PutParameterError, R>) -> StoreError {
    match err {
        SdkError::ServiceError(_) => StoreError::Rejected(DisplayErrorContext(&err).to_string()),
        other => transport(other),
    }
}

/// Exact-name filter for `DescribeParameters`.
fn name_filter(name: &str) -> StoreResult<ParameterStringFilter> {
    ParameterStringFilter::builder()
        .key("Name")
        .option("Equals")
        .values(name)
        .build()
        .map_err(|e| StoreError::InvalidRequest(e.to_string()))
}

fn missing(name: &str, field: &'static str) -> StoreError {
    StoreError::MissingField {
        name: name.to_string(),
        field,
    }
}

fn parse_type(name: &str, kind: &aws_sdk_ssm::types::ParameterType) -> StoreResult<ParameterType> {
    kind.as_str()
        .parse()
        .map_err(|kind| StoreError::UnsupportedType {
            name: name.to_string(),
            kind,
        })
}

fn summary_from(meta: &ParameterMetadata) -> StoreResult<ParameterSummary> {
    let name = meta.name().ok_or_else(|| missing("(unnamed)", "name"))?;
    let kind = meta
        .r#type()
        .ok_or_else(|| missing(name, "type"))
        .and_then(|kind| parse_type(name, kind))?;

    Ok(ParameterSummary {
        name: name.to_string(),
        kind,
        description: meta.description().map(str::to_string),
    })
}
