//! Prompt construction for delegating backends.
//!
//! The payload is: an instruction header, the output contract for the
//! backend's format, then every artifact as a `== identifier ==` section in
//! supply order.

use std::fmt::Write;

use crate::artifact::ArtifactSet;
use crate::parse::OutputFormat;

const HEADER: &str = "Compare the following files and find every place where they disagree \
with each other, such as behaviour an implementation has that its documentation \
does not describe, or documented behaviour the implementation lacks.\n";

const JSON_CONTRACT: &str = r#"Reply with exactly one JSON object in the following format:
```json
{
  "summary": "overall assessment of the files",
  "errors": [
    {
      "file1": "path of the first file",
      "file2": "path of the second file",
      "description": "what contradicts"
    }
  ]
}
```
Use the file paths exactly as they appear in the section headers below.
If there are no contradictions, leave the errors array empty.
"#;

const LINE_CONTRACT: &str = "Report each contradiction on its own line in the format\n\
<file1>,<file2>:<description>\n\
Use the file paths exactly as they appear in the section headers below and write \
nothing else. If there are no contradictions, reply with an empty message.\n";

/// System instruction for chat-style backends.
pub fn system_prompt(locale: &str) -> String {
    format!(
        "You are an expert at finding contradictions between source code and its \
         documentation and reporting them precisely. Always answer in the requested \
         format. Write descriptions in the language of the locale LANG={}.",
        locale
    )
}

/// Render the user payload for `artifacts`.
pub fn build(artifacts: &ArtifactSet, format: OutputFormat) -> String {
    let mut prompt = String::new();
    prompt.push_str(HEADER);
    prompt.push_str(match format {
        OutputFormat::Json => JSON_CONTRACT,
        OutputFormat::Lines => LINE_CONTRACT,
    });
    prompt.push('\n');

    for artifact in artifacts.iter() {
        // Writing into a String cannot fail
        let _ = writeln!(prompt, "== {} ==", artifact.identifier());
        prompt.push_str(artifact.content());
        prompt.push_str("\n\n");
    }

    prompt
}
