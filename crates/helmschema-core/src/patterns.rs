//! Path-pattern override table
//!
//! Helm charts follow conventions the raw value can't reveal: `enabled`
//! flags are often templated with a string, `annotations` may be a literal
//! YAML blob, ports are frequently left null. Each rule maps path fragments
//! to the union of types such a field accepts in practice.
//!
//! Rules are evaluated in declaration order and the first matching fragment
//! wins. Order is significant: `service.containerport` matches the `port`
//! fragment of the null/integer rule long before the Kubernetes rule at the
//! bottom, and that is the type it gets.

use crate::schema::{SchemaType, TypeSet};

use SchemaType::{Array, Boolean, Integer, Null, Number, Object, String};

/// How a rule fragment is compared against a lowercased path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Substring anywhere in the path
    Contains,
    /// Whole path equals the fragment, or the path ends with `.fragment`
    ExactOrSuffix,
}

impl MatchMode {
    fn matches(&self, path: &str, fragment: &str) -> bool {
        match self {
            Self::Contains => path.contains(fragment),
            Self::ExactOrSuffix => {
                path == fragment
                    || path
                        .strip_suffix(fragment)
                        .is_some_and(|head| head.ends_with('.'))
            }
        }
    }
}

/// One row of the table
#[derive(Debug)]
pub struct PatternRule {
    /// Short label used in debug output
    pub name: &'static str,
    /// Lowercase fragments, tried in order
    pub fragments: &'static [&'static str],
    pub mode: MatchMode,
    /// Returned verbatim on match
    pub types: &'static [SchemaType],
}

/// A successful lookup
#[derive(Debug, Clone, Copy)]
pub struct PatternMatch {
    pub rule: &'static PatternRule,
    pub fragment: &'static str,
}

impl PatternMatch {
    pub fn type_set(&self) -> TypeSet {
        TypeSet::Union(self.rule.types.to_vec())
    }
}

/// The override table, in evaluation order
pub static PATTERN_TABLE: &[PatternRule] = &[
    PatternRule {
        name: "yaml-or-map",
        fragments: &[
            "annotations",
            "labels",
            "nodeselector",
            "securitycontext",
            "affinity",
            "strategy",
            "networkpolicy",
            "objectselector",
            "poddisruptionbudget",
            "hostaliases",
            "matchlabels",
            "nodeaffinity",
            "podaffinity",
            "podantiaffinity",
            "selector",
            "topology",
            "rules",
            "expressions",
            "rollingupdate",
        ],
        mode: MatchMode::Contains,
        types: &[Object, String],
    },
    PatternRule {
        name: "feature-toggle",
        fragments: &[
            "autoscaling",
            "forceupgrade",
            "createnamespace",
            "autosync",
            "persistence",
            "tls",
            "auth",
            "hostnetwork",
            "hostpid",
            "hostipc",
            "singlenamespace",
            "debug",
            "rbac",
            "monitoring",
            "istio",
            "serviceaccount",
            "automounttoken",
            "priorityclass",
            "metrics",
            "tracing",
        ],
        mode: MatchMode::Contains,
        types: &[Boolean, String],
    },
    PatternRule {
        name: "enabled-flag",
        fragments: &["enabled"],
        mode: MatchMode::ExactOrSuffix,
        types: &[Boolean, String],
    },
    PatternRule {
        name: "optional-list",
        fragments: &[
            "tolerations",
            "topologyspreadconstraints",
            "volumes",
            "initcontainers",
            "extracontainers",
            "volumemounts",
            "imagepullsecrets",
            "hostalias",
            "sidecars",
            "extravolumes",
            "extrainitcontainers",
            "envfrom",
            "args",
            "command",
            "ports",
            "env",
            "environment",
            "secrets",
            "configmaps",
            "pods",
            "endpoints",
            "tls.hosts",
            "ingress.hosts",
            "hostaliases",
            "deploymentannotations",
            "podsecuritycontext",
            "permissions",
        ],
        mode: MatchMode::Contains,
        types: &[Null, Array, String],
    },
    PatternRule {
        name: "optional-name",
        fragments: &[
            "secretname",
            "storageclass",
            "servicenodeport",
            "priorityclassname",
            "certname",
            "keyname",
            "cabundle",
            "ingressclassname",
            "authsecret",
            "namespace",
            "finalizer",
            "servicename",
            "clusterrole",
            "role",
            "healthcheckpath",
            "mountpath",
            "filename",
            "secretkey",
            "timezone",
            "bootstrapservers",
            "topic",
        ],
        mode: MatchMode::Contains,
        types: &[Null, String],
    },
    PatternRule {
        name: "optional-count",
        fragments: &[
            "maxunavailable",
            "nodeport",
            "replicacount",
            "replicas",
            "port",
            "targetport",
            "containerport",
            "serviceport",
            "metricsport",
            "healthport",
            "readinessport",
            "maxreplicas",
            "minreplicas",
            "terminationgraceperiodseconds",
            "backofflimit",
            "failurethreshold",
            "successthreshold",
            "initialdelayseconds",
            "timeoutseconds",
            "periodseconds",
            "minavailable",
            "retention",
            "timeout",
            "limit",
            "weight",
        ],
        mode: MatchMode::Contains,
        types: &[Null, Integer],
    },
    PatternRule {
        name: "config-block",
        fragments: &[
            "config",
            "extraenv",
            "extraenvironmentvars",
            "extravolumeconfig",
            "configuration",
            "settings",
            "options",
            "parameters",
            "properties",
            "authentication",
            "authorization",
            "security",
            "networking",
            "customvalues",
            "extraconfigs",
        ],
        mode: MatchMode::Contains,
        types: &[String, Object],
    },
    PatternRule {
        name: "quantity",
        fragments: &[
            "resources.limits.memory",
            "resources.requests.memory",
            "memory",
            "resources.limits.cpu",
            "resources.requests.cpu",
            "cpu",
            "resources.limits",
            "resources.requests",
            "threshold",
            "percentage",
            "ratio",
            "factor",
            "scalar",
            "weight",
            "scale",
            "bytes",
            "size",
            "quota",
            "maxsurge",
            "minavailable",
            "retention",
        ],
        mode: MatchMode::Contains,
        types: &[String, Integer, Number],
    },
    PatternRule {
        name: "mode-switch",
        fragments: &[
            "preference",
            "mode",
            "state",
            "status",
            "level",
            "type",
            "policy",
            "protocol",
        ],
        mode: MatchMode::Contains,
        types: &[String, Integer, Boolean],
    },
    PatternRule {
        name: "embedded-document",
        fragments: &[
            "json",
            "raw",
            "patch",
            "template",
            "customdata",
            "extradata",
            "override",
            "manifest",
        ],
        mode: MatchMode::Contains,
        types: &[String, Object, Array],
    },
    PatternRule {
        name: "kubernetes-field",
        fragments: &[
            "containerport",
            "servicetype",
            "ingresstype",
            "secrettype",
            "podannotations",
            "accessmodes",
            "pathtype",
            "readinessprobe",
            "livenessprobe",
            "startupprobe",
            "volumesource",
            "volumetype",
            "service.containerport",
        ],
        mode: MatchMode::Contains,
        types: &[String, Object, Array],
    },
];

/// Find the first rule matching `path`
pub fn lookup(path: &str) -> Option<PatternMatch> {
    let lowered = path.to_lowercase();
    PATTERN_TABLE.iter().find_map(|rule| {
        rule.fragments
            .iter()
            .find(|fragment| rule.mode.matches(&lowered, fragment))
            .map(|fragment| PatternMatch { rule, fragment })
    })
}

/// Union type for `path`, if any rule matches
pub fn lookup_types(path: &str) -> Option<TypeSet> {
    lookup(path).map(|m| m.type_set())
}
