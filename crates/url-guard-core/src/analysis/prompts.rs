use super::ScanType;

const MALWARE_PROMPT: &str = "You are a cybersecurity expert specializing in malware detection. Analyze the provided URL and assess its safety based on common malware indicators such as:
- Known malicious domains
- Suspicious URL patterns (excessive subdomains, random strings, etc.)
- Potential phishing attempts
- Drive-by download risks
- Malvertising indicators

Provide a safety score (0-100) where 100 is completely safe. Return findings and recommendations.";

const VULNERABILITY_PROMPT: &str = "You are a security analyst specializing in vulnerability assessment. Analyze the provided URL for potential security weaknesses such as:
- Outdated software signatures
- Known CVEs
- Weak encryption indicators
- Exposed sensitive endpoints
- Missing security headers
- SQL injection or XSS vulnerability patterns

Provide a safety score (0-100) where 100 is completely safe. Return findings and recommendations.";

const LEGAL_PROMPT: &str = "You are a legal compliance and security standards expert. Analyze the provided URL for compliance with security regulations such as:
- GDPR compliance indicators
- Privacy policy presence
- SSL/TLS certificate validity
- Cookie consent mechanisms
- Terms of service
- Data protection measures

Provide a safety score (0-100) where 100 is fully compliant. Return findings and recommendations.";

/// Fixed system instruction for a scan category.
pub fn system_prompt(scan_type: ScanType) -> &'static str {
    match scan_type {
        ScanType::Malware => MALWARE_PROMPT,
        ScanType::Vulnerability => VULNERABILITY_PROMPT,
        ScanType::Legal => LEGAL_PROMPT,
    }
}

/// User message carrying the target URL and the JSON shape the model must answer in.
pub fn user_prompt(url: &str) -> String {
    format!(
        r#"Analyze this URL for security: {url}

Please respond in the following JSON format:
{{
  "safetyScore": <number between 0-100>,
  "status": "<safe|warning|danger>",
  "findings": ["<finding1>", "<finding2>", ...],
  "recommendations": ["<recommendation1>", "<recommendation2>", ...]
}}

Base your analysis on the URL structure, domain reputation, and known security patterns. Be thorough but realistic - this is an educational security analysis tool."#
    )
}
