use super::ResponseFilter;
use crate::auth::AuthContext;
use crate::models::Deployment;

/// Drops deployments that touch no app under the caller's namespace.
///
/// Membership is the only thing decided here; surviving deployments keep
/// their input order and every nested field untouched.
pub struct NamespaceVisibilityFilter;

impl ResponseFilter for NamespaceVisibilityFilter {
    fn name(&self) -> &'static str {
        "namespace_visibility"
    }

    fn apply(&self, ctx: &AuthContext, deployments: Vec<Deployment>) -> Vec<Deployment> {
        deployments
            .into_iter()
            .filter(|deployment| {
                deployment
                    .affected_apps
                    .iter()
                    .any(|app_id| top_level_segment(app_id) == Some(ctx.namespace.as_str()))
            })
            .collect()
    }
}

/// First path segment of a slash-delimited app id: `/foo/bar` -> `foo`.
fn top_level_segment(app_id: &str) -> Option<&str> {
    app_id
        .trim_start_matches('/')
        .split('/')
        .next()
        .filter(|segment| !segment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx(namespace: &str) -> AuthContext {
        AuthContext {
            user: "someone@corp".to_string(),
            namespace: namespace.to_string(),
        }
    }

    fn fixture() -> Vec<Deployment> {
        serde_json::from_value(json!([
            {
                "id": "d-0",
                "affectedApps": ["/foo"],
                "currentStep": 2,
                "steps": [{"actions": [{"action": "ScaleApplication", "app": "/foo"}]}],
                "totalSteps": 2
            },
            {
                "id": "d-1",
                "affectedApps": ["/infra/logstash"],
                "totalSteps": 1
            },
            {
                "id": "d-2",
                "affectedApps": ["/infra/sieve", "/foo/healthcheck"]
            }
        ]))
        .unwrap()
    }

    #[test]
    fn keeps_only_deployments_touching_the_namespace() {
        let visible = NamespaceVisibilityFilter.apply(&ctx("infra"), fixture());
        let ids: Vec<&str> = visible.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["d-1", "d-2"]);
    }

    #[test]
    fn one_owned_app_is_enough() {
        let visible = NamespaceVisibilityFilter.apply(&ctx("foo"), fixture());
        let ids: Vec<&str> = visible.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["d-0", "d-2"]);
    }

    #[test]
    fn surviving_payloads_are_untouched() {
        let original = serde_json::to_value(&fixture()[0]).unwrap();
        let visible = NamespaceVisibilityFilter.apply(&ctx("foo"), fixture());
        assert_eq!(serde_json::to_value(&visible[0]).unwrap(), original);
    }

    #[test]
    fn namespace_match_is_on_the_top_segment_only() {
        let deployments: Vec<Deployment> = serde_json::from_value(json!([
            {"id": "d-0", "affectedApps": ["/foobar"]}
        ]))
        .unwrap();
        assert!(NamespaceVisibilityFilter.apply(&ctx("foo"), deployments).is_empty());
    }
}
