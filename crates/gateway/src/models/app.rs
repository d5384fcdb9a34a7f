use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A Marathon application definition as submitted by a client.
///
/// `container.docker.parameters` is where the ownership label lives; the
/// rest of the spec is carried untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSpec {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<Container>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Container {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker: Option<Docker>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Docker {
    #[serde(default)]
    pub parameters: Vec<DockerParameter>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// One `docker run` parameter; ownership labels use `key == "label"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerParameter {
    pub key: String,
    pub value: String,
}

impl AppSpec {
    /// Docker parameter list, materializing the container path when the
    /// submitted spec did not carry one.
    pub fn docker_parameters_mut(&mut self) -> &mut Vec<DockerParameter> {
        &mut self
            .container
            .get_or_insert_with(Container::default)
            .docker
            .get_or_insert_with(Docker::default)
            .parameters
    }

    pub fn docker_parameters(&self) -> &[DockerParameter] {
        self.container
            .as_ref()
            .and_then(|container| container.docker.as_ref())
            .map(|docker| docker.parameters.as_slice())
            .unwrap_or(&[])
    }
}
