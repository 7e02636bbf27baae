use std::fmt;

/// Declares a closed set of key segments with their flat string forms.
macro_rules! key_segment {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Every segment, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// The flat string form used in persisted keys.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }

            /// Parse the flat string form. Unknown input yields `None`.
            pub fn parse(s: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|segment| segment.as_str() == s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

key_segment! {
    /// Where the assessed application runs.
    pub enum Location {
        Gcp => "gcp",
        OnPrem => "onprem",
        Hybrid => "hybrid",
    }
}

key_segment! {
    /// An externally visible part of the application.
    pub enum Capability {
        Frontend => "frontend",
        Backend => "backend",
        Apis => "apis",
        Mobile => "mobile",
    }
}

key_segment! {
    /// Tri-state integration categories asked per capability.
    pub enum Integration {
        Reporting => "reporting",
        Stip => "stip",
        Geneos => "geneos",
        Lisi => "lisi",
    }
}

key_segment! {
    /// Multi-choice drill-down categories asked per capability and provider.
    pub enum Signal {
        Monitoring => "monitoring",
        Alerting => "alerting",
    }
}

key_segment! {
    /// Observability tooling vendors.
    pub enum Provider {
        NewRelic => "newrelic",
        Splunk => "splunk",
        CloudMonitoring => "cloud-monitoring",
    }
}

key_segment! {
    /// Identity and classification fields at the top of the questionnaire.
    pub enum MetaField {
        AppName => "app_name",
        Role => "role",
        RoleOther => "role_other",
        NarId => "nar_id",
        ContactEmail => "contact_email",
        AppType => "app_type",
        AppTypeOther => "app_type_other",
        Location => "loc_selected",
        OtherMentions => "other_mentions",
    }
}

key_segment! {
    /// Top-level SLO, disaster recovery and best practice questions.
    pub enum Practice {
        SloExists => "slo_exists",
        SloPdm => "slo_pdm",
        DrPlan => "dr_plan",
        DrRtoRpo => "dr_rto_rpo",
        DrTested => "dr_tested",
        BpRunbooks => "bp_runbooks",
        BpSpof => "bp_spof",
        BpNoise => "bp_noise",
        BpMttr => "bp_mttr",
        BpDependencies => "bp_dependencies",
    }
}

key_segment! {
    /// Follow-up questions asked when an SLO/SLA structure exists.
    pub enum SloDetail {
        Latency => "slo_latency",
        Availability => "slo_availability",
        ErrorBudget => "slo_error_budget",
    }
}

impl Location {
    /// Display name, e.g. `On-Prem`.
    pub fn title(self) -> &'static str {
        match self {
            Self::Gcp => "GCP",
            Self::OnPrem => "On-Prem",
            Self::Hybrid => "Hybrid",
        }
    }
}

impl Capability {
    pub fn title(self) -> &'static str {
        match self {
            Self::Frontend => "Frontend",
            Self::Backend => "Backend",
            Self::Apis => "APIs",
            Self::Mobile => "Mobile",
        }
    }
}

impl Integration {
    pub fn title(self) -> &'static str {
        match self {
            Self::Reporting => "Reporting",
            Self::Stip => "Stip Integration",
            Self::Geneos => "Geneos Integration",
            Self::Lisi => "Lisi Integration",
        }
    }
}

impl Signal {
    pub fn title(self) -> &'static str {
        match self {
            Self::Monitoring => "Monitoring",
            Self::Alerting => "Alerting",
        }
    }
}

impl Provider {
    pub fn title(self) -> &'static str {
        match self {
            Self::NewRelic => "New Relic",
            Self::Splunk => "Splunk",
            Self::CloudMonitoring => "Cloud Monitoring-Logging",
        }
    }
}

/// A typed identifier for one question of the questionnaire.
///
/// Nested questions are addressed by a tuple of segments rather than by
/// concatenated strings. The flat form used in query strings is produced by
/// `Display` and read back by [`QuestionKey::parse`]:
///
/// | Key | Flat form |
/// |---|---|
/// | `Capability(Gcp, Frontend)` | `loc_gcp_frontend` |
/// | `Integration(Gcp, Frontend, Stip)` | `loc_gcp_frontend_stip` |
/// | `Signal(Gcp, Frontend, Monitoring, NewRelic)` | `loc_gcp_frontend_monitoring_newrelic` |
/// | `StipProvider(Gcp, Frontend, Splunk)` | `loc_gcp_frontend_stip_splunk` |
/// | `Link(DrPlan)` | `dr_plan_link` |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QuestionKey {
    Meta(MetaField),
    Practice(Practice),
    Slo(SloDetail),
    /// Link to the documentation backing a practice answered "yes".
    Link(Practice),
    Capability(Location, Capability),
    Integration(Location, Capability, Integration),
    Signal(Location, Capability, Signal, Provider),
    StipProvider(Location, Capability, Provider),
}

const LOCATION_PREFIX: &str = "loc_";
const LINK_SUFFIX: &str = "_link";

impl QuestionKey {
    /// Parse a flat key. Returns `None` for anything that is not a well-formed key.
    pub fn parse(s: &str) -> Option<Self> {
        // `loc_selected` shares the location prefix, so metadata goes first.
        if let Some(field) = MetaField::parse(s) {
            return Some(Self::Meta(field));
        }
        if let Some(rest) = s.strip_prefix(LOCATION_PREFIX) {
            return Self::parse_location_key(rest);
        }
        if let Some(practice) = s.strip_suffix(LINK_SUFFIX) {
            return Practice::parse(practice).map(Self::Link);
        }
        Practice::parse(s)
            .map(Self::Practice)
            .or_else(|| SloDetail::parse(s).map(Self::Slo))
    }

    fn parse_location_key(rest: &str) -> Option<Self> {
        let parts: Vec<&str> = rest.split('_').collect();
        let location = Location::parse(parts.first()?)?;
        let capability = Capability::parse(parts.get(1)?)?;

        match &parts[2..] {
            [] => Some(Self::Capability(location, capability)),
            [integration] => Integration::parse(integration)
                .map(|integration| Self::Integration(location, capability, integration)),
            ["stip", provider] => Provider::parse(provider)
                .map(|provider| Self::StipProvider(location, capability, provider)),
            [signal, provider] => Some(Self::Signal(
                location,
                capability,
                Signal::parse(signal)?,
                Provider::parse(provider)?,
            )),
            _ => None,
        }
    }

    /// The location segment of a location-scoped key.
    pub fn location(&self) -> Option<Location> {
        match *self {
            Self::Capability(location, _)
            | Self::Integration(location, _, _)
            | Self::Signal(location, _, _, _)
            | Self::StipProvider(location, _, _) => Some(location),
            _ => None,
        }
    }

    /// The capability segment of a location-scoped key.
    pub fn capability(&self) -> Option<Capability> {
        match *self {
            Self::Capability(_, capability)
            | Self::Integration(_, capability, _)
            | Self::Signal(_, capability, _, _)
            | Self::StipProvider(_, capability, _) => Some(capability),
            _ => None,
        }
    }
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Meta(field) => write!(f, "{field}"),
            Self::Practice(practice) => write!(f, "{practice}"),
            Self::Slo(detail) => write!(f, "{detail}"),
            Self::Link(practice) => write!(f, "{practice}{LINK_SUFFIX}"),
            Self::Capability(location, capability) => {
                write!(f, "{LOCATION_PREFIX}{location}_{capability}")
            }
            Self::Integration(location, capability, integration) => {
                write!(f, "{LOCATION_PREFIX}{location}_{capability}_{integration}")
            }
            Self::Signal(location, capability, signal, provider) => {
                write!(f, "{LOCATION_PREFIX}{location}_{capability}_{signal}_{provider}")
            }
            Self::StipProvider(location, capability, provider) => {
                write!(f, "{LOCATION_PREFIX}{location}_{capability}_stip_{provider}")
            }
        }
    }
}

impl From<MetaField> for QuestionKey {
    fn from(field: MetaField) -> Self {
        Self::Meta(field)
    }
}

impl From<Practice> for QuestionKey {
    fn from(practice: Practice) -> Self {
        Self::Practice(practice)
    }
}

impl From<SloDetail> for QuestionKey {
    fn from(detail: SloDetail) -> Self {
        Self::Slo(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_nested_keys() {
        let key = QuestionKey::Signal(
            Location::Gcp,
            Capability::Frontend,
            Signal::Monitoring,
            Provider::CloudMonitoring,
        );
        assert_eq!(key.to_string(), "loc_gcp_frontend_monitoring_cloud-monitoring");

        let key = QuestionKey::StipProvider(Location::OnPrem, Capability::Apis, Provider::Splunk);
        assert_eq!(key.to_string(), "loc_onprem_apis_stip_splunk");

        assert_eq!(QuestionKey::Link(Practice::DrPlan).to_string(), "dr_plan_link");
    }

    #[test]
    fn parse_location_selector_is_metadata() {
        assert_eq!(
            QuestionKey::parse("loc_selected"),
            Some(QuestionKey::Meta(MetaField::Location))
        );
    }

    #[test]
    fn parse_distinguishes_integration_from_stip_provider() {
        assert_eq!(
            QuestionKey::parse("loc_hybrid_mobile_stip"),
            Some(QuestionKey::Integration(
                Location::Hybrid,
                Capability::Mobile,
                Integration::Stip
            ))
        );
        assert_eq!(
            QuestionKey::parse("loc_hybrid_mobile_stip_newrelic"),
            Some(QuestionKey::StipProvider(
                Location::Hybrid,
                Capability::Mobile,
                Provider::NewRelic
            ))
        );
    }

    #[test]
    fn parse_every_location_key() {
        for &location in Location::ALL {
            for &capability in Capability::ALL {
                let mut keys = vec![QuestionKey::Capability(location, capability)];
                for &integration in Integration::ALL {
                    keys.push(QuestionKey::Integration(location, capability, integration));
                }
                for &provider in Provider::ALL {
                    keys.push(QuestionKey::StipProvider(location, capability, provider));
                    for &signal in Signal::ALL {
                        keys.push(QuestionKey::Signal(location, capability, signal, provider));
                    }
                }
                for key in keys {
                    assert_eq!(QuestionKey::parse(&key.to_string()), Some(key));
                }
            }
        }
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_eq!(QuestionKey::parse(""), None);
        assert_eq!(QuestionKey::parse("utm_source"), None);
        assert_eq!(QuestionKey::parse("loc_mars_frontend"), None);
        assert_eq!(QuestionKey::parse("loc_gcp_frontend_tracing"), None);
        assert_eq!(QuestionKey::parse("loc_gcp_frontend_monitoring_datadog"), None);
        assert_eq!(QuestionKey::parse("loc_gcp_frontend_monitoring_newrelic_extra"), None);
        assert_eq!(QuestionKey::parse("app_name_link"), None);
    }

    #[test]
    fn segments_expose_location_and_capability() {
        let key = QuestionKey::Integration(Location::Gcp, Capability::Backend, Integration::Lisi);
        assert_eq!(key.location(), Some(Location::Gcp));
        assert_eq!(key.capability(), Some(Capability::Backend));
        assert_eq!(QuestionKey::Practice(Practice::BpMttr).location(), None);
    }
}
