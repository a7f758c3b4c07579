//! Suggested `resources:` section for a container manifest

use crate::models::SuggestionResult;

/// Render the YAML-shaped snippet shown to the operator
pub fn render(container: &str, suggestion: &SuggestionResult) -> String {
    format!(
        "[...]
spec:
    containers:
    - name: {container}
      resources:
          limits:
              cpu: {cpu_limit}
              memory: {memory_limit}
          requests:
              cpu: {cpu_request}
              memory: {memory_request}
[...]",
        container = container,
        cpu_limit = suggestion.cpu_limit,
        memory_limit = suggestion.memory_limit,
        cpu_request = suggestion.cpu_request,
        memory_request = suggestion.memory_request,
    )
}
