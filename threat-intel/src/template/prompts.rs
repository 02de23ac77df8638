//! Built-in report prompt templates

use crate::error::{IntelError, Result};
use crate::template::{render, TemplateContext};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// A named argument accepted by a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PromptArgument {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

/// An immutable report template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub arguments: &'static [PromptArgument],
    pub body: &'static str,
}

impl PromptTemplate {
    /// Render with the supplied arguments.
    ///
    /// Every declared argument is bound, so optional sections of arguments the caller
    /// left out are dropped. Arguments the prompt does not declare are ignored.
    pub fn render(&self, args: &HashMap<String, String>) -> Result<String> {
        let mut context = TemplateContext::new();

        for argument in self.arguments {
            let value = args
                .get(argument.name)
                .filter(|value| !value.trim().is_empty());

            if argument.required && value.is_none() {
                return Err(IntelError::MissingPromptArgument {
                    prompt: self.name.to_string(),
                    argument: argument.name.to_string(),
                });
            }

            context.set(argument.name, value.cloned());
        }

        for key in args.keys().filter(|key| !context.contains_key(key)) {
            debug!(prompt = self.name, argument = %key, "ignoring undeclared prompt argument");
        }

        Ok(render(self.body, &context))
    }
}

/// Lookup over the built-in prompts
#[derive(Debug, Clone, Copy)]
pub struct PromptRegistry {
    prompts: &'static [PromptTemplate],
}

impl Default for PromptRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptRegistry {
    pub fn new() -> Self {
        Self { prompts: PROMPTS }
    }

    pub fn prompts(&self) -> &'static [PromptTemplate] {
        self.prompts
    }

    pub fn get(&self, name: &str) -> Result<&'static PromptTemplate> {
        self.prompts
            .iter()
            .find(|prompt| prompt.name == name)
            .ok_or_else(|| IntelError::UnknownPrompt {
                name: name.to_string(),
            })
    }

    pub fn render(&self, name: &str, args: &HashMap<String, String>) -> Result<String> {
        self.get(name)?.render(args)
    }
}

const fn required(name: &'static str, description: &'static str) -> PromptArgument {
    PromptArgument {
        name,
        description,
        required: true,
    }
}

const fn optional(name: &'static str, description: &'static str) -> PromptArgument {
    PromptArgument {
        name,
        description,
        required: false,
    }
}

pub static PROMPTS: &[PromptTemplate] = &[
    PromptTemplate {
        name: "Cyber Security Threat Intelligence Report",
        description: "Generate a comprehensive threat intelligence report for a threat actor, country, industry, or organization",
        arguments: &[
            required("Target", "Name of the threat actor, country, industry, or organization to analyze"),
            optional("Time Period", "Time period for analysis (e.g., 'last 30 days', 'Q1 2024')"),
        ],
        body: "Generate a comprehensive threat intelligence report for {{Target}}{{#Time Period}} covering {{Time Period}}{{/Time Period}}.
Include the following sections:
1. Executive Summary
2. Actor Profile and Attribution
3. Tactics, Techniques, and Procedures (TTPs)
4. Infrastructure Analysis
5. Target Analysis
6. Recent Activity Summary
7. Indicators of Compromise (IOCs)
8. Defensive Recommendations
9. Risk Assessment

IMPORTANT: Use the get_threat_actor_profile tool first to get comprehensive actor information and attributed threat feeds. This ensures accurate attribution and the most relevant intelligence. Supplement with additional CVE and threat feed searches as needed. Provide actionable intelligence for SOC teams and threat hunters.",
    },
    PromptTemplate {
        name: "CVE Impact Assessment",
        description: "Assess the impact and urgency of CVEs for organizational risk management",
        arguments: &[
            required("CVE ID", "CVE identifier (e.g., CVE-2024-1234)"),
            optional("Industry", "Industry sector (e.g., 'Financial Services', 'Healthcare', 'Government')"),
        ],
        body: "Conduct a detailed impact assessment for {{CVE ID}}{{#Industry}} in the context of {{Industry}} organizations{{/Industry}}.
Analyze:
1. Vulnerability Details and Technical Impact
2. CVSS Score Breakdown and Risk Rating
3. Affected Products and Versions
4. Exploitation Likelihood and Threat Landscape
5. Business Impact Assessment
6. Patch Availability and Mitigation Strategies
7. Detection and Monitoring Recommendations
8. Priority Level and Response Timeline

Use FalconFeeds data to identify any active exploitation or threat actor interest in this vulnerability.",
    },
    PromptTemplate {
        name: "Ransomware Analysis",
        description: "Analyze Ransomware activity and patterns",
        arguments: &[
            required("Ransomware Name", "Name of the ransomware to analyze"),
            optional("Time Frame", "Analysis time frame (e.g., 'last 30 days', 'Q1 2024')"),
        ],
        body: "Analyze threat activity patterns for {{Ransomware Name}}{{#Time Frame}} over {{Time Frame}}{{/Time Frame}}.
Include:
1. Ransomware Overview and Current Landscape
2. Most Active Threat Actors in this Category
3. Common Attack Vectors and Methods
4. Target Industry and Geographic Analysis
5. Recent Campaign Highlights
6. Victim Impact Assessment
7. Detection and Prevention Strategies
8. Threat Intelligence Recommendations

Use FalconFeeds threat feed data filtered by the Ransomware category to provide current intelligence.",
    },
    PromptTemplate {
        name: "Industry-Specific Threat Assessment",
        description: "Generate industry-specific threat briefings for industry verticals",
        arguments: &[
            required("Industry", "Industry sector (e.g., 'Healthcare', 'Financial Services', 'Government', 'Energy')"),
            optional("Geographic Region", "Geographic focus (e.g., 'United States', 'United Kingdom', 'Germany')"),
        ],
        body: "Generate a comprehensive threat briefing for the {{Industry}} sector{{#Geographic Region}} in {{Geographic Region}}{{/Geographic Region}}.

Cover:
1. Current Threat Landscape Overview
2. Sector-Specific Targeting Trends
3. Major Threat Actors and Their Motivations
4. Common Attack Categories and Methods
5. Recent High-Impact Incidents
6. Industry-Specific Vulnerabilities
7. Regional Threat Patterns
8. Defensive Best Practices
9. Threat Intelligence Recommendations

Utilize FalconFeeds threat feed data filtered by industry and geographic targeting to provide current intelligence.",
    },
    PromptTemplate {
        name: "Threat Actor Comparison",
        description: "Perform detailed cyber threat intelligence analysis comparing multiple threat actors' TTPs, infrastructure, and operational patterns to identify overlaps and distinctions in their methodologies",
        arguments: &[
            required("Threat Actors", "Comma-separated list of threat actor names to compare"),
            optional("Analysis Focus", "Specific aspect to focus on (e.g., 'TTPs', 'targeting', 'infrastructure')"),
        ],
        body: "Conduct a comparative analysis of the following threat actors: {{Threat Actors}}{{#Analysis Focus}} with focus on {{Analysis Focus}}{{/Analysis Focus}}.

Analyze and compare:
1. Actor Profiles and Attribution
2. Operational Capabilities and Sophistication
3. Targeting Preferences and Victim Selection
4. Attack Methods and Techniques
5. Infrastructure and Tools Usage
6. Activity Timelines and Patterns
7. Potential Relationships or Collaborations
8. Threat Level Assessment
9. Detection and Mitigation Strategies

Use get_threat_actor_profile for each actor to gather comprehensive intelligence and compare their attributed activities from FalconFeeds.",
    },
    PromptTemplate {
        name: "Geopolitical Threat Landscape Assessment",
        description: "Conduct comprehensive country-specific cyber threat landscape analysis for strategic threat intelligence and national security assessment",
        arguments: &[
            required("Country", "Target country for threat landscape analysis (e.g., 'United States', 'Germany', 'Japan')"),
            optional("Assessment Period", "Temporal scope for analysis (e.g., 'Q4 2024', 'last 6 months', 'YTD 2024')"),
            optional("Focus Area", "Specific focus area for deeper analysis (e.g., 'critical infrastructure', 'financial sector', 'government entities')"),
        ],
        body: "Conduct a comprehensive geopolitical cyber threat landscape assessment for {{Country}}{{#Assessment Period}} covering {{Assessment Period}}{{/Assessment Period}}{{#Focus Area}} with emphasis on {{Focus Area}}{{/Focus Area}}.

METHODOLOGY: Utilize FalconFeeds country-specific threat intelligence to provide evidence-based analysis. Cross-reference threat actor activities, attack patterns, and victim targeting data.

EXECUTIVE SUMMARY:
Provide a concise overview of the current threat landscape and key findings.

DETAILED ANALYSIS SECTIONS:

1. **Threat Actor Ecosystem**
   - State-sponsored Advanced Persistent Threats (APTs) targeting {{Country}}
   - Cybercriminal organizations operating against {{Country}} entities
   - Hacktivist groups and their motivations
   - Attribution confidence levels and intelligence gaps

2. **Attack Vector Analysis**
   - Primary attack methodologies observed
   - Sector-specific targeting patterns
   - Infrastructure compromise trends
   - Supply chain attack incidents

3. **Critical Infrastructure Threat Assessment**
   - Energy sector targeting and vulnerabilities
   - Financial services threat exposure
   - Healthcare and government entity risks
   - Telecommunications and technology sector threats

4. **Victim Impact Metrics**
   - Quantitative analysis of confirmed breaches
   - Economic impact assessment where available
   - Data exfiltration patterns and types
   - Service disruption incidents

5. **Threat Intelligence Gaps**
   - Areas requiring enhanced collection
   - Attribution challenges and uncertainties
   - Emerging threat vectors requiring monitoring

6. **Strategic Recommendations**
   - National cybersecurity posture improvements
   - Sector-specific defensive priorities
   - International cooperation opportunities
   - Threat hunting focus areas

7. **Indicators and Warning Signs**
   - Key indicators of compromise (IOCs)
   - Behavioral patterns for detection
   - Early warning signals for emerging threats

INTELLIGENCE SOURCES: Leverage get_threat_feeds_by_country tool for {{Country}}-specific threat intelligence. Supplement with threat actor profiling and cross-border attack pattern analysis from FalconFeeds database.

CLASSIFICATION: Provide appropriate handling and distribution guidance for the intelligence contained within this assessment.",
    },
];
