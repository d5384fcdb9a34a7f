use super::label;
use super::{FilterError, RequestFilter};
use crate::auth::AuthContext;
use crate::models::{AppSpec, DockerParameter};

/// Stamps the canonical ownership label onto an outbound app spec.
///
/// The label value is always the id the client targeted with this request;
/// whatever ownership labels the submitted spec already carried, correct,
/// stale or duplicated, are dropped first. Idempotent.
pub struct AppNameFilter;

impl RequestFilter for AppNameFilter {
    fn name(&self) -> &'static str {
        "appname"
    }

    fn apply(
        &self,
        _ctx: &AuthContext,
        request_app: &mut AppSpec,
        _original_app: &AppSpec,
    ) -> Result<(), FilterError> {
        // Never the original spec's id and never a value dug out of prior
        // metadata: the request's own target id is the only source.
        let canonical = label::encode(&request_app.id);
        let parameters = request_app.docker_parameters_mut();
        parameters.retain(|parameter| !label::is_ownership_label(&parameter.value));
        parameters.push(DockerParameter {
            key: "label".to_string(),
            value: canonical,
        });
        Ok(())
    }
}
