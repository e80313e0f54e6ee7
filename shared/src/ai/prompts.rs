pub const PR_ANALYSIS: &str = "
    <Instructions>
        Your role is to analyse a GitHub pull request using its title, description and the diffs of its changed files.
        Produce a short analysis for the reviewers of the pull request.
        The summary should explain what the pull request changes and why, in two to four sentences.
        The risks should list concrete ways the changes could break existing behaviour, based only on code you can see in the diffs.
        The tests should list specific tests a reviewer should add or run to gain confidence in the changes.
        The docs snippet should be a one or two sentence changelog entry written for end users.
        Pay attention to what has been deleted (denoted by '-') or added (denoted by '+') so you don't describe code that is no longer present.
        Some diffs may be cut short; avoid speculating about code that isn't shown.
    </Instructions>
    <Output>
        Respond with strict JSON only, without Markdown code fences or any text before or after it.
        The JSON object must have exactly these keys:
        - \"summary\": a string.
        - \"risks\": an array of strings.
        - \"tests\": an array of strings.
        - \"docsSnippet\": a string.
    </Output>
";
