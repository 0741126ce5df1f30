//! Synthesis guidance templates attached to research payloads
//!
//! The facade performs no synthesis itself; these fixed instructions direct
//! the calling agent to cross-reference the gathered sources and produce a
//! structured briefing. One template per depth, selected by enum key.

use crate::search::Depth;

const QUICK_GUIDANCE: &str = "\
The sources above are raw material, not an answer. Read every title and \
snippet, extract the key claims, and distill them into a short summary. \
Prefer facts that appear in more than one source; mark anything found in \
only a single source as unverified. Do not return the source list itself.";

const STANDARD_GUIDANCE: &str = "\
The sources above are raw material for analysis, not an answer. Required \
process: (1) read all titles and snippets; (2) extract the key claims and \
facts; (3) cross-reference them - claims confirmed by multiple sources are \
high confidence, single-source claims are low confidence and must be \
flagged as unverified; (4) note contradictions between sources. Produce a \
structured briefing: an executive summary of two or three sentences, key \
findings each tagged with a confidence level, and any contradictions or \
open uncertainties. Synthesize into narrative form; do not output numbered \
source lists or bare URLs.";

const DEEP_GUIDANCE: &str = "\
The sources above are raw material for analysis, not an answer. Required \
process: (1) read all titles and snippets; (2) extract the key claims and \
facts; (3) cross-reference them - claims confirmed by five or more sources \
are high confidence, by two to four are medium, single-source claims are \
low confidence and must be flagged as unverified; (4) note contradictions \
between sources; (5) assess source quality using the engine attribution on \
each result (which engines surfaced what). Produce a structured briefing: \
an executive summary, key findings each tagged with a confidence level and \
the number of confirming sources, contradictions or open uncertainties, a \
source quality assessment, and a brief conclusion. Synthesize into \
narrative form; do not output numbered source lists or bare URLs.";

/// Fixed synthesis instructions for a research depth
pub fn synthesis_guidance(depth: Depth) -> &'static str {
    match depth {
        Depth::Quick => QUICK_GUIDANCE,
        Depth::Standard => STANDARD_GUIDANCE,
        Depth::Deep => DEEP_GUIDANCE,
    }
}
