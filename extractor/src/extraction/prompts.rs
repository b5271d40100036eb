//! Instruction text for the primary and repair calls.

/// System instructions shared by both calls.
pub const SYSTEM_INSTRUCTIONS: &str = "\
You are an information extraction engine for small-team ops notes.

Return ONLY valid JSON. No markdown, no backticks, no commentary.
Do NOT invent owners or due dates. If not explicitly stated, use null (for due) and \"unassigned\" (for owner).
Ignore social chatter that is not actionable.
Use lowercase enums: urgency in {\"high\",\"medium\",\"low\"}, status in {\"todo\",\"doing\",\"done\",\"blocked\"} and severity in {\"low\",\"medium\",\"high\"}.
If notes are too vague, add clarifying questions in questions[].
";

/// The literal output contract quoted to the model.
pub const OUTPUT_CONTRACT: &str = r#"{
  "priorities": [{"title": str, "reason": str, "urgency": "high"|"medium"|"low"}],
  "tasks": [{"title": str, "owner": str, "due": str|null, "status": "todo"|"doing"|"done"|"blocked", "confidence": float}],
  "blockers": [{"title": str, "impacts": [str], "suggested_fix": str, "severity": "low"|"medium"|"high"}],
  "weekly_report": {"done": [str], "next": [str], "risks": [str], "asks": [str]},
  "questions": [{"question": str, "why": str}],
  "meta": {"received_chars": int, "mode": "success"}
}"#;

/// Primary call: the contract followed by the notes.
#[must_use]
pub fn build_user_prompt(notes: &str) -> String {
    format!(
        "Extract structured ops data from the notes below and output JSON EXACTLY with this schema:\n\n\
         {OUTPUT_CONTRACT}\n\n\
         NOTES:\n\"\"\"{notes}\"\"\"\n"
    )
}

/// Repair call: the first response, verbatim, with a fix-it instruction.
#[must_use]
pub fn build_repair_prompt(broken_output: &str) -> String {
    format!(
        "Fix the following into VALID JSON ONLY that matches the schema exactly.\n\
         No commentary. Output JSON only.\n\n\
         SCHEMA:\n{OUTPUT_CONTRACT}\n\n\
         BROKEN_OUTPUT:\n{broken_output}\n"
    )
}

/// Repair call when the primary call returned nothing to fix.
#[must_use]
pub fn build_reextract_prompt(notes: &str) -> String {
    format!(
        "The previous attempt produced no output. Extract again.\n\
         Output VALID JSON ONLY that matches the schema exactly. No commentary.\n\n\
         SCHEMA:\n{OUTPUT_CONTRACT}\n\n\
         NOTES:\n\"\"\"{notes}\"\"\"\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_embeds_contract_and_notes() {
        let prompt = build_user_prompt("Ana: deploy blocked on creds");
        assert!(prompt.contains("output JSON EXACTLY"));
        assert!(prompt.contains("\"weekly_report\""));
        assert!(prompt.contains("NOTES:\n\"\"\"Ana: deploy blocked on creds\"\"\""));
    }

    #[test]
    fn test_repair_prompt_embeds_output_verbatim() {
        let broken = "Sure! ```json\n{\"tasks\": [,]}\n``` hope that helps";
        let prompt = build_repair_prompt(broken);
        assert!(prompt.contains("VALID JSON ONLY"));
        assert!(prompt.contains(&format!("BROKEN_OUTPUT:\n{broken}\n")));
    }

    #[test]
    fn test_reextract_prompt_carries_notes() {
        let prompt = build_reextract_prompt("standup");
        assert!(prompt.contains("no output"));
        assert!(prompt.contains("\"\"\"standup\"\"\""));
        assert!(!prompt.contains("BROKEN_OUTPUT"));
    }
}
