//! Intent catalog — the static table of intents and their pattern rules.
//!
//! Each intent lists case-insensitive patterns in priority order, each with a
//! `ParamMap` saying which capture group feeds which parameter role. The
//! table is plain data: adding an intent means adding an `IntentSpec` entry.
//!
//! Declaration order is observable. When two rules score the same confidence
//! the one declared first wins, so "open chrome" resolves to `launch_app`
//! rather than `open_file`.

use regex::{Regex, RegexBuilder};

use crate::error::{PipelineError, PipelineResult};

/// Capture-group index for each parameter role a rule can fill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParamMap {
    pub target: Option<usize>,
    pub value: Option<usize>,
    pub direction: Option<usize>,
    pub query: Option<usize>,
    pub name: Option<usize>,
}

impl ParamMap {
    /// A rule that extracts nothing.
    pub const NONE: Self = Self {
        target: None,
        value: None,
        direction: None,
        query: None,
        name: None,
    };

    pub const fn target(group: usize) -> Self {
        Self {
            target: Some(group),
            ..Self::NONE
        }
    }

    pub const fn value(group: usize) -> Self {
        Self {
            value: Some(group),
            ..Self::NONE
        }
    }

    pub const fn direction(group: usize) -> Self {
        Self {
            direction: Some(group),
            ..Self::NONE
        }
    }

    pub const fn query(group: usize) -> Self {
        Self {
            query: Some(group),
            ..Self::NONE
        }
    }

    pub const fn name(group: usize) -> Self {
        Self {
            name: Some(group),
            ..Self::NONE
        }
    }
}

/// Uncompiled rule: pattern source plus parameter map.
#[derive(Debug, Clone, Copy)]
pub struct RuleSpec {
    pub pattern: &'static str,
    pub params: ParamMap,
}

const fn rule(pattern: &'static str, params: ParamMap) -> RuleSpec {
    RuleSpec { pattern, params }
}

/// Uncompiled intent: name plus ordered rules.
#[derive(Debug, Clone, Copy)]
pub struct IntentSpec {
    pub name: &'static str,
    pub rules: &'static [RuleSpec],
}

/// Built-in intents, in tie-break order.
pub const BUILTIN_INTENTS: &[IntentSpec] = &[
    // ── Application control ─────────────────────────────────────
    IntentSpec {
        name: "launch_app",
        rules: &[
            rule(r"\b(open|launch|start|run)\s+(.+)", ParamMap::target(2)),
            rule(r"\bi need\s+(.+)", ParamMap::target(1)),
            rule(r"\bshow me\s+(.+)", ParamMap::target(1)),
        ],
    },
    IntentSpec {
        name: "close_app",
        rules: &[
            rule(
                r"\b(close|quit|exit|kill|terminate|end)\s+(.+)",
                ParamMap::target(2),
            ),
            rule(r"\bstop\s+(.+)", ParamMap::target(1)),
        ],
    },
    IntentSpec {
        name: "switch_app",
        rules: &[rule(
            r"\b(switch to|go to|focus|bring up)\s+(.+)",
            ParamMap::target(2),
        )],
    },
    IntentSpec {
        name: "list_apps",
        rules: &[rule(
            r"\b(list|show|what).*?(running|open|active).*?(apps|applications|programs)",
            ParamMap::NONE,
        )],
    },
    // ── Screenshots ─────────────────────────────────────────────
    IntentSpec {
        name: "screenshot",
        rules: &[
            rule(
                r"\b(take|capture|grab|screenshot|screencap)\s+(a\s+)?(screenshot|screen|capture)",
                ParamMap::NONE,
            ),
            rule(r"\bscreenshot\b", ParamMap::NONE),
        ],
    },
    IntentSpec {
        name: "screenshot_window",
        rules: &[
            rule(r"\bscreenshot\s+(this|the|active)?\s*window", ParamMap::NONE),
            rule(r"\bcapture\s+(this|the|active)?\s*window", ParamMap::NONE),
        ],
    },
    IntentSpec {
        name: "screenshot_region",
        rules: &[
            rule(r"\bscreenshot\s+(this|an?)?\s*area", ParamMap::NONE),
            rule(r"\bcapture\s+region", ParamMap::NONE),
        ],
    },
    // ── System control ──────────────────────────────────────────
    IntentSpec {
        name: "volume",
        rules: &[
            rule(
                r"\b(set|change|adjust)?\s*volume\s+(to\s+)?(\d+)\s*%?",
                ParamMap::value(3),
            ),
            rule(r"\bvolume\s+(up|down)", ParamMap::direction(1)),
        ],
    },
    IntentSpec {
        name: "mute",
        rules: &[rule(r"\b(mute|unmute|silence)", ParamMap::NONE)],
    },
    IntentSpec {
        name: "brightness",
        rules: &[
            rule(
                r"\b(set|change|adjust)?\s*brightness\s+(to\s+)?(\d+)\s*%?",
                ParamMap::value(3),
            ),
            rule(r"\bbrightness\s+(up|down)", ParamMap::direction(1)),
        ],
    },
    IntentSpec {
        name: "system_info",
        rules: &[
            rule(r"\bhow.?s\s+(the\s+)?(system|computer|pc)", ParamMap::NONE),
            rule(
                r"\b(system|computer)\s+(status|info|information)",
                ParamMap::NONE,
            ),
            rule(r"\ball systems", ParamMap::NONE),
        ],
    },
    IntentSpec {
        name: "lock_screen",
        rules: &[rule(
            r"\block\s+(my\s+)?(computer|screen|workstation|pc)",
            ParamMap::NONE,
        )],
    },
    IntentSpec {
        name: "shutdown",
        rules: &[rule(
            r"\b(shutdown|shut down|power off|turn off)",
            ParamMap::NONE,
        )],
    },
    IntentSpec {
        name: "restart",
        rules: &[rule(r"\b(restart|reboot)", ParamMap::NONE)],
    },
    IntentSpec {
        name: "sleep",
        rules: &[rule(r"\b(sleep|hibernate)", ParamMap::NONE)],
    },
    // ── File operations ─────────────────────────────────────────
    IntentSpec {
        name: "open_file",
        rules: &[rule(
            r"\bopen\s+(file|folder|directory)?\s*(.+)",
            ParamMap::target(2),
        )],
    },
    IntentSpec {
        name: "find_files",
        rules: &[
            rule(
                r"\b(find|search|locate)\s+(all\s+)?(.+?)\s+(files?|in)",
                ParamMap::query(3),
            ),
            rule(r"\bwhere\s+(is|are)\s+(.+)", ParamMap::query(2)),
        ],
    },
    IntentSpec {
        name: "create_folder",
        rules: &[
            rule(
                r"\bcreate\s+(a\s+)?(new\s+)?(folder|directory)\s+(.+)",
                ParamMap::name(4),
            ),
            rule(r"\bnew\s+folder\s+(.+)", ParamMap::name(1)),
        ],
    },
    IntentSpec {
        name: "delete_file",
        rules: &[
            rule(r"\bdelete\s+(.+)", ParamMap::target(1)),
            rule(r"\bremove\s+(.+)", ParamMap::target(1)),
        ],
    },
    // ── Window management ───────────────────────────────────────
    IntentSpec {
        name: "maximize",
        rules: &[rule(r"\bmaximize", ParamMap::NONE)],
    },
    IntentSpec {
        name: "minimize",
        rules: &[rule(r"\bminimize", ParamMap::NONE)],
    },
    IntentSpec {
        name: "split_screen",
        rules: &[
            rule(r"\bsplit\s+screen", ParamMap::NONE),
            rule(r"\bside\s+by\s+side", ParamMap::NONE),
        ],
    },
    // ── Information queries ─────────────────────────────────────
    IntentSpec {
        name: "time",
        rules: &[rule(
            r"\b(what.?s\s+the\s+time|what time|current time)",
            ParamMap::NONE,
        )],
    },
    IntentSpec {
        name: "date",
        rules: &[rule(
            r"\b(what.?s\s+the\s+date|what date|today.?s date)",
            ParamMap::NONE,
        )],
    },
    IntentSpec {
        name: "weather",
        rules: &[rule(
            r"\b(what.?s\s+the\s+weather|weather|forecast)",
            ParamMap::NONE,
        )],
    },
    // ── Conversation ────────────────────────────────────────────
    IntentSpec {
        name: "greeting",
        rules: &[rule(r"\b(hello|hi|hey|greetings)", ParamMap::NONE)],
    },
    IntentSpec {
        name: "status",
        rules: &[rule(
            r"\b(status|are you (there|online|working))",
            ParamMap::NONE,
        )],
    },
    IntentSpec {
        name: "help",
        rules: &[rule(
            r"\b(help|what can you do|commands|capabilities)",
            ParamMap::NONE,
        )],
    },
    IntentSpec {
        name: "thank",
        rules: &[rule(r"\b(thank you|thanks|thx)", ParamMap::NONE)],
    },
];

/// A compiled pattern rule.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub regex: Regex,
    pub params: ParamMap,
}

/// A compiled intent with its rules in priority order.
#[derive(Debug, Clone)]
pub struct IntentDefinition {
    pub name: String,
    pub rules: Vec<PatternRule>,
}

/// Immutable, ordered set of intent definitions.
#[derive(Debug, Clone, Default)]
pub struct IntentCatalog {
    intents: Vec<IntentDefinition>,
}

impl IntentCatalog {
    /// Compile the built-in intent table.
    pub fn builtin() -> PipelineResult<Self> {
        Self::from_specs(BUILTIN_INTENTS)
    }

    /// Compile a catalog from specs, preserving their order.
    pub fn from_specs(specs: &[IntentSpec]) -> PipelineResult<Self> {
        specs.iter().try_fold(Self::default(), |catalog, spec| {
            let rules: Vec<_> = spec.rules.iter().map(|r| (r.pattern, r.params)).collect();
            catalog.with_intent(spec.name, &rules)
        })
    }

    /// Append an intent after the existing ones.
    pub fn with_intent(mut self, name: &str, rules: &[(&str, ParamMap)]) -> PipelineResult<Self> {
        if self.get(name).is_some() {
            return Err(PipelineError::DuplicateIntent(name.to_string()));
        }

        let rules = rules
            .iter()
            .map(|(pattern, params)| {
                let regex = RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| PipelineError::Pattern {
                        intent: name.to_string(),
                        source,
                    })?;
                Ok(PatternRule {
                    regex,
                    params: *params,
                })
            })
            .collect::<PipelineResult<Vec<_>>>()?;

        self.intents.push(IntentDefinition {
            name: name.to_string(),
            rules,
        });
        Ok(self)
    }

    pub fn intents(&self) -> &[IntentDefinition] {
        &self.intents
    }

    pub fn get(&self, name: &str) -> Option<&IntentDefinition> {
        self.intents.iter().find(|i| i.name == name)
    }

    /// Intent names in catalog order.
    pub fn names(&self) -> Vec<&str> {
        self.intents.iter().map(|i| i.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}
