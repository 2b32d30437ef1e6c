//! Domain entity handles

use crate::level::Level;
use crate::model::DomainModel;
use crate::DomainError;
use riskgraph_core::model::Iri;
use riskgraph_core::text::split_description;
use riskgraph_core::vocabulary::Predicate;

/// Cache partition of a domain entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainKind {
    Asset,
    CaSetting,
    ConstructionPattern,
    Control,
    ControlSet,
    ControlStrategy,
    InferredLink,
    Level,
    MaDefaultSetting,
    MatchingPattern,
    Misbehaviour,
    MisbehaviourSet,
    Node,
    Relation,
    Role,
    RoleLink,
    RootPattern,
    Threat,
    ThreatCategory,
    TrustworthinessAttribute,
    TrustworthinessAttributeSet,
    TrustworthinessImpactSet,
}

/// Label and comment contract shared by every domain entity
pub trait DomainEntity<'m> {
    fn iri(&self) -> &Iri;

    fn model(&self) -> &'m DomainModel;

    fn label(&self) -> Option<String> {
        self.model().label_of(self.iri())
    }

    fn comment(&self) -> Option<String> {
        self.model().comment_of(self.iri())
    }
}

macro_rules! domain_handle {
    ($(#[$meta:meta])* $name:ident $({ $($item:item)* })?) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name<'m> {
            record: std::sync::Arc<riskgraph_core::cache::EntityRecord<$crate::entity::DomainKind>>,
            model: &'m $crate::model::DomainModel,
        }

        impl<'m> $name<'m> {
            pub(crate) fn new(
                record: std::sync::Arc<riskgraph_core::cache::EntityRecord<$crate::entity::DomainKind>>,
                model: &'m $crate::model::DomainModel,
            ) -> Self {
                Self { record, model }
            }
        }

        impl<'m> $crate::entity::DomainEntity<'m> for $name<'m> {
            fn iri(&self) -> &riskgraph_core::model::Iri {
                self.record.iri()
            }

            fn model(&self) -> &'m $crate::model::DomainModel {
                self.model
            }

            $($($item)*)?
        }

        impl PartialEq for $name<'_> {
            fn eq(&self, other: &Self) -> bool {
                std::sync::Arc::ptr_eq(&self.record, &other.record) && std::ptr::eq(self.model, other.model)
            }
        }

        impl Eq for $name<'_> {}

        impl std::fmt::Debug for $name<'_> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.record.iri().as_str()).finish()
            }
        }

        impl std::fmt::Display for $name<'_> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let label = $crate::entity::DomainEntity::label(self);
                write!(
                    f,
                    "Domain {}: {} ({})",
                    stringify!($name),
                    label.as_deref().unwrap_or(riskgraph_core::text::MISSING_TEXT),
                    self.record.iri()
                )
            }
        }
    };
}

pub(crate) use domain_handle;

domain_handle!(
    /// An asset class
    Asset {
        /// Falls back to the trailing segment of the identifier when the class
        /// has no label
        fn label(&self) -> Option<String> {
            Some(
                self.model
                    .label_of(self.iri())
                    .unwrap_or_else(|| self.iri().local_name().to_string()),
            )
        }
    }
);

impl<'m> Asset<'m> {
    pub fn is_visible(&self) -> Option<bool> {
        self.model.flag(self.iri(), Predicate::IsVisible)
    }

    pub fn is_assertable(&self) -> Option<bool> {
        self.model.flag(self.iri(), Predicate::IsAssertable)
    }

    /// Direct superclasses
    pub fn parents(&self) -> Vec<Asset<'m>> {
        self.model
            .iri_values(self.iri(), Predicate::SubClassOf)
            .iter()
            .map(|iri| self.model.asset(iri))
            .collect()
    }

    /// Attributes given a default at this class
    pub fn trustworthiness_attributes(&self) -> Vec<TrustworthinessAttribute<'m>> {
        let mut attributes = Vec::new();
        for setting in self.model.iri_subjects(Predicate::MetaLocatedAt, self.iri()) {
            for twa in self.model.iri_values(&setting, Predicate::HasTwa) {
                let attribute = self.model.trustworthiness_attribute(&twa);
                if !attributes.contains(&attribute) {
                    attributes.push(attribute);
                }
            }
        }
        attributes
    }
}

domain_handle!(
    /// A control that can be applied at an asset
    Control
);

impl<'m> Control<'m> {
    pub fn is_visible(&self) -> Option<bool> {
        self.model.flag(self.iri(), Predicate::IsVisible)
    }

    pub fn unit_cost(&self) -> Option<Level<'m>> {
        self.model.level_ref(self.iri(), Predicate::UnitCost)
    }

    pub fn min(&self) -> Option<Level<'m>> {
        self.model.level_ref(self.iri(), Predicate::HasMin)
    }

    pub fn max(&self) -> Option<Level<'m>> {
        self.model.level_ref(self.iri(), Predicate::HasMax)
    }

    pub fn located_at(&self) -> Option<Asset<'m>> {
        self.model.iri_value(self.iri(), Predicate::LocatedAt).map(|iri| self.model.asset(&iri))
    }

    pub fn performance_impact(&self) -> Option<Level<'m>> {
        self.model.level_ref(self.iri(), Predicate::PerformanceImpact)
    }
}

domain_handle!(
    /// A bundle of control sets that blocks or mitigates threats
    ControlStrategy
);

impl<'m> ControlStrategy<'m> {
    /// Blocking-effect level
    pub fn effectiveness(&self) -> Option<Level<'m>> {
        self.model.level_ref(self.iri(), Predicate::HasBlockingEffect)
    }

    pub fn effectiveness_value(&self) -> Result<Option<i64>, DomainError> {
        self.effectiveness().map(|level| level.level_value()).transpose()
    }

    pub fn effectiveness_label(&self) -> Option<String> {
        self.effectiveness().and_then(|level| level.label())
    }

    /// Current-risk strategies carry the flag and are runtime or
    /// implementation variants
    pub fn is_current_risk(&self) -> bool {
        let iri = self.iri().as_str();
        self.model.flag(self.iri(), Predicate::IsCurrentRisk).unwrap_or(false)
            && (iri.contains("-Runtime") || iri.contains("-Implementation"))
    }

    pub fn is_future_risk(&self) -> bool {
        self.model.flag(self.iri(), Predicate::IsFutureRisk).unwrap_or(false)
    }

    /// Highest likelihood a threat can keep once this strategy is active
    pub fn maximum_likelihood_value(&self) -> Result<Option<i64>, DomainError> {
        Ok(self
            .effectiveness_value()?
            .map(|value| self.model.level_number_inverse(value)))
    }

    pub fn blocks(&self) -> Vec<Threat<'m>> {
        self.model
            .iri_values(self.iri(), Predicate::Blocks)
            .iter()
            .map(|iri| self.model.threat(iri))
            .collect()
    }

    pub fn mitigates(&self) -> Vec<Threat<'m>> {
        self.model
            .iri_values(self.iri(), Predicate::Mitigates)
            .iter()
            .map(|iri| self.model.threat(iri))
            .collect()
    }

    pub fn min(&self) -> Option<Level<'m>> {
        self.model.level_ref(self.iri(), Predicate::HasMin)
    }

    pub fn max(&self) -> Option<Level<'m>> {
        self.model.level_ref(self.iri(), Predicate::HasMax)
    }

    pub fn mandatory_control_sets(&self) -> Vec<ControlSet<'m>> {
        self.model
            .iri_values(self.iri(), Predicate::HasMandatoryControlSet)
            .iter()
            .map(|iri| self.model.control_set(iri))
            .collect()
    }

    pub fn optional_control_sets(&self) -> Vec<ControlSet<'m>> {
        self.model
            .iri_values(self.iri(), Predicate::HasOptionalControlSet)
            .iter()
            .map(|iri| self.model.control_set(iri))
            .collect()
    }
}

domain_handle!(
    /// A relation type between asset classes
    Relation
);

impl<'m> Relation<'m> {
    pub fn range(&self) -> Vec<Asset<'m>> {
        self.model
            .iri_values(self.iri(), Predicate::Range)
            .iter()
            .map(|iri| self.model.asset(iri))
            .collect()
    }

    pub fn domain(&self) -> Vec<Asset<'m>> {
        self.model
            .iri_values(self.iri(), Predicate::Domain)
            .iter()
            .map(|iri| self.model.asset(iri))
            .collect()
    }
}

domain_handle!(
    /// A kind of failure or impact an asset can suffer
    Misbehaviour
);

impl<'m> Misbehaviour<'m> {
    pub fn is_visible(&self) -> Option<bool> {
        self.model.flag(self.iri(), Predicate::IsVisible)
    }

    pub fn min(&self) -> Option<Level<'m>> {
        self.model.level_ref(self.iri(), Predicate::HasMin)
    }

    pub fn max(&self) -> Option<Level<'m>> {
        self.model.level_ref(self.iri(), Predicate::HasMax)
    }

    pub fn located_at(&self) -> Option<Asset<'m>> {
        self.model.iri_value(self.iri(), Predicate::LocatedAt).map(|iri| self.model.asset(&iri))
    }
}

domain_handle!(
    /// A threat type
    Threat
);

impl<'m> Threat<'m> {
    /// Comment text up to its first unquoted colon
    pub fn short_description(&self) -> Option<String> {
        let comment = self.comment()?;
        let short = split_description(&comment).short().to_string();
        Some(short)
    }

    /// Comment text after its first unquoted colon, first letter uppercased
    pub fn long_description(&self) -> Option<String> {
        let comment = self.comment()?;
        split_description(&comment).long()
    }

    pub fn category(&self) -> Option<ThreatCategory<'m>> {
        self.model
            .iri_value(self.iri(), Predicate::HasCategory)
            .map(|iri| self.model.threat_category(&iri))
    }

    pub fn frequency(&self) -> Option<Level<'m>> {
        self.model.level_ref(self.iri(), Predicate::HasFrequency)
    }

    pub fn is_current_risk(&self) -> Option<bool> {
        self.model.flag(self.iri(), Predicate::IsCurrentRisk)
    }

    pub fn is_future_risk(&self) -> Option<bool> {
        self.model.flag(self.iri(), Predicate::IsFutureRisk)
    }

    pub fn is_secondary_threat(&self) -> Option<bool> {
        self.model.flag(self.iri(), Predicate::IsSecondaryThreat)
    }

    pub fn is_normal_op(&self) -> Option<bool> {
        self.model.flag(self.iri(), Predicate::IsNormalOp)
    }

    pub fn min(&self) -> Option<Level<'m>> {
        self.model.level_ref(self.iri(), Predicate::HasMin)
    }

    pub fn max(&self) -> Option<Level<'m>> {
        self.model.level_ref(self.iri(), Predicate::HasMax)
    }

    pub fn causes_misbehaviours(&self) -> Vec<MisbehaviourSet<'m>> {
        self.model
            .iri_values(self.iri(), Predicate::CausesMisbehaviour)
            .iter()
            .map(|iri| self.model.misbehaviour_set(iri))
            .collect()
    }

    pub fn entry_points(&self) -> Vec<TrustworthinessAttributeSet<'m>> {
        self.model
            .iri_values(self.iri(), Predicate::HasEntryPoint)
            .iter()
            .map(|iri| self.model.trustworthiness_attribute_set(iri))
            .collect()
    }

    pub fn applies_to(&self) -> Option<MatchingPattern<'m>> {
        self.model
            .iri_value(self.iri(), Predicate::AppliesTo)
            .map(|iri| self.model.matching_pattern(&iri))
    }

    pub fn threatens(&self) -> Option<Node<'m>> {
        self.model.iri_value(self.iri(), Predicate::Threatens).map(|iri| self.model.node(&iri))
    }
}

domain_handle!(
    /// A trustworthiness attribute, such as user trust or extrinsic reliability
    TrustworthinessAttribute
);

impl<'m> TrustworthinessAttribute<'m> {
    pub fn is_visible(&self) -> Option<bool> {
        self.model.flag(self.iri(), Predicate::IsVisible)
    }

    pub fn min_of(&self) -> Option<TrustworthinessAttribute<'m>> {
        self.model
            .iri_value(self.iri(), Predicate::MinOf)
            .map(|iri| self.model.trustworthiness_attribute(&iri))
    }

    pub fn meta_located_at(&self) -> Vec<Asset<'m>> {
        self.model
            .iri_values(self.iri(), Predicate::MetaLocatedAt)
            .iter()
            .map(|iri| self.model.asset(iri))
            .collect()
    }
}

domain_handle!(
    /// A trustworthiness attribute at a pattern node
    TrustworthinessAttributeSet
);

impl<'m> TrustworthinessAttributeSet<'m> {
    pub fn is_visible(&self) -> Option<bool> {
        self.model.flag(self.iri(), Predicate::IsVisible)
    }

    pub fn located_at(&self) -> Option<Node<'m>> {
        self.model.iri_value(self.iri(), Predicate::LocatedAt).map(|iri| self.model.node(&iri))
    }

    pub fn trustworthiness_attribute(&self) -> Option<TrustworthinessAttribute<'m>> {
        self.model
            .iri_value(self.iri(), Predicate::HasTwa)
            .map(|iri| self.model.trustworthiness_attribute(&iri))
    }
}

domain_handle!(
    /// A role an asset plays in a pattern
    Role
);

impl<'m> Role<'m> {
    pub fn meta_located_at(&self) -> Vec<Asset<'m>> {
        self.model
            .iri_values(self.iri(), Predicate::MetaLocatedAt)
            .iter()
            .map(|iri| self.model.asset(iri))
            .collect()
    }
}

domain_handle!(Node);

impl<'m> Node<'m> {
    pub fn meta_asset(&self) -> Option<Asset<'m>> {
        self.model.iri_value(self.iri(), Predicate::MetaHasAsset).map(|iri| self.model.asset(&iri))
    }

    pub fn role(&self) -> Option<Role<'m>> {
        self.model.iri_value(self.iri(), Predicate::HasRole).map(|iri| self.model.role(&iri))
    }
}

domain_handle!(
    /// A typed link between two roles of a pattern
    RoleLink
);

impl<'m> RoleLink<'m> {
    pub fn link_type(&self) -> Option<Relation<'m>> {
        self.model.iri_value(self.iri(), Predicate::LinkType).map(|iri| self.model.relation(&iri))
    }

    pub fn links_from(&self) -> Option<Role<'m>> {
        self.model.iri_value(self.iri(), Predicate::LinksFrom).map(|iri| self.model.role(&iri))
    }

    pub fn links_to(&self) -> Option<Role<'m>> {
        self.model.iri_value(self.iri(), Predicate::LinksTo).map(|iri| self.model.role(&iri))
    }
}

domain_handle!(
    /// A link a construction pattern adds between nodes
    InferredLink
);

impl<'m> InferredLink<'m> {
    pub fn link_type(&self) -> Option<Relation<'m>> {
        self.model.iri_value(self.iri(), Predicate::LinkType).map(|iri| self.model.relation(&iri))
    }

    pub fn links_from(&self) -> Option<Node<'m>> {
        self.model.iri_value(self.iri(), Predicate::LinksFrom).map(|iri| self.model.node(&iri))
    }

    pub fn links_to(&self) -> Option<Node<'m>> {
        self.model.iri_value(self.iri(), Predicate::LinksTo).map(|iri| self.model.node(&iri))
    }
}

domain_handle!(MatchingPattern);

impl<'m> MatchingPattern<'m> {
    pub fn root_pattern(&self) -> Option<RootPattern<'m>> {
        self.model
            .iri_value(self.iri(), Predicate::HasRootPattern)
            .map(|iri| self.model.root_pattern(&iri))
    }
}

domain_handle!(
    /// A rule that adds inferred links to a system graph
    ConstructionPattern
);

impl<'m> ConstructionPattern<'m> {
    pub fn matching_pattern(&self) -> Option<MatchingPattern<'m>> {
        self.model
            .iri_value(self.iri(), Predicate::HasMatchingPattern)
            .map(|iri| self.model.matching_pattern(&iri))
    }

    pub fn priority(&self) -> Result<Option<i64>, DomainError> {
        self.model.integer(self.iri(), Predicate::HasPriority)
    }

    pub fn iterate(&self) -> Option<bool> {
        self.model.flag(self.iri(), Predicate::Iterate)
    }

    pub fn max_iterations(&self) -> Result<Option<i64>, DomainError> {
        self.model.integer(self.iri(), Predicate::MaxIterations)
    }

    pub fn inferred_links(&self) -> Vec<InferredLink<'m>> {
        self.model
            .iri_values(self.iri(), Predicate::HasInferredLink)
            .iter()
            .map(|iri| self.model.inferred_link(iri))
            .collect()
    }
}

domain_handle!(RootPattern);

impl<'m> RootPattern<'m> {
    pub fn key_nodes(&self) -> Vec<Node<'m>> {
        self.model
            .iri_values(self.iri(), Predicate::HasKeyNode)
            .iter()
            .map(|iri| self.model.node(iri))
            .collect()
    }

    pub fn links(&self) -> Vec<RoleLink<'m>> {
        self.model
            .iri_values(self.iri(), Predicate::HasLink)
            .iter()
            .map(|iri| self.model.role_link(iri))
            .collect()
    }
}

domain_handle!(ThreatCategory);

domain_handle!(
    /// How a misbehaviour lowers a trustworthiness attribute
    TrustworthinessImpactSet
);

impl<'m> TrustworthinessImpactSet<'m> {
    pub fn affected_by(&self) -> Option<Misbehaviour<'m>> {
        self.model
            .iri_value(self.iri(), Predicate::AffectedBy)
            .map(|iri| self.model.misbehaviour(&iri))
    }

    pub fn affects(&self) -> Option<TrustworthinessAttribute<'m>> {
        self.model
            .iri_value(self.iri(), Predicate::Affects)
            .map(|iri| self.model.trustworthiness_attribute(&iri))
    }
}

domain_handle!(
    /// Control assertion setting for an asset class
    CaSetting
);

impl<'m> CaSetting<'m> {
    pub fn control(&self) -> Option<Control<'m>> {
        self.model.iri_value(self.iri(), Predicate::HasControl).map(|iri| self.model.control(&iri))
    }

    pub fn meta_located_at(&self) -> Option<Asset<'m>> {
        self.model
            .iri_value(self.iri(), Predicate::MetaLocatedAt)
            .map(|iri| self.model.asset(&iri))
    }

    pub fn is_assertable(&self) -> Option<bool> {
        self.model.flag(self.iri(), Predicate::IsAssertable)
    }

    pub fn level(&self) -> Option<Level<'m>> {
        self.model.level_ref(self.iri(), Predicate::HasLevel)
    }

    pub fn independent_levels(&self) -> Option<bool> {
        self.model.flag(self.iri(), Predicate::IndependentLevels)
    }
}

domain_handle!(
    /// Default misbehaviour level for an asset class
    MaDefaultSetting
);

impl<'m> MaDefaultSetting<'m> {
    pub fn located_at(&self) -> Option<Asset<'m>> {
        self.model
            .iri_value(self.iri(), Predicate::MetaLocatedAt)
            .or_else(|| self.model.iri_value(self.iri(), Predicate::LocatedAt))
            .map(|iri| self.model.asset(&iri))
    }

    pub fn misbehaviour(&self) -> Option<Misbehaviour<'m>> {
        self.model
            .iri_value(self.iri(), Predicate::HasMisbehaviour)
            .map(|iri| self.model.misbehaviour(&iri))
    }

    pub fn level(&self) -> Option<Level<'m>> {
        self.model.level_ref(self.iri(), Predicate::HasLevel)
    }
}

domain_handle!(
    /// A control at a pattern node
    ControlSet
);

impl<'m> ControlSet<'m> {
    pub fn control(&self) -> Option<Control<'m>> {
        self.model.iri_value(self.iri(), Predicate::HasControl).map(|iri| self.model.control(&iri))
    }

    pub fn located_at(&self) -> Option<Node<'m>> {
        self.model.iri_value(self.iri(), Predicate::LocatedAt).map(|iri| self.model.node(&iri))
    }
}

domain_handle!(
    /// A misbehaviour at a pattern node
    MisbehaviourSet
);

impl<'m> MisbehaviourSet<'m> {
    pub fn misbehaviour(&self) -> Option<Misbehaviour<'m>> {
        self.model
            .iri_value(self.iri(), Predicate::HasMisbehaviour)
            .map(|iri| self.model.misbehaviour(&iri))
    }

    pub fn located_at(&self) -> Option<Node<'m>> {
        self.model.iri_value(self.iri(), Predicate::LocatedAt).map(|iri| self.model.node(&iri))
    }
}
