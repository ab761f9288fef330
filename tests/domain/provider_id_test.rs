use sightline::domain::ProviderId;

#[test]
fn given_wire_identifiers_when_parsing_then_maps_every_provider() {
    assert_eq!("OPENAI".parse::<ProviderId>(), Ok(ProviderId::OpenAi));
    assert_eq!("CLAUDE_ANTHROPIC".parse::<ProviderId>(), Ok(ProviderId::Anthropic));
    assert_eq!("AWS_RECOGNITION".parse::<ProviderId>(), Ok(ProviderId::AwsRekognition));
    assert_eq!("GOOGLE_VISION".parse::<ProviderId>(), Ok(ProviderId::GoogleVision));
    assert_eq!("ASTICA".parse::<ProviderId>(), Ok(ProviderId::Astica));
}

#[test]
fn given_surrounding_whitespace_when_parsing_then_trims() {
    assert_eq!("  OPENAI \n".parse::<ProviderId>(), Ok(ProviderId::OpenAi));
}

#[test]
fn given_unknown_or_lowercase_identifier_when_parsing_then_fails() {
    assert!("GEMINI".parse::<ProviderId>().is_err());
    assert!("openai".parse::<ProviderId>().is_err());
    assert!("".parse::<ProviderId>().is_err());
}

#[test]
fn given_provider_when_serialized_then_uses_wire_identifier() {
    let json = serde_json::to_string(&ProviderId::AwsRekognition).unwrap();
    assert_eq!(json, r#""AWS_RECOGNITION""#);
    assert_eq!(ProviderId::Anthropic.to_string(), "CLAUDE_ANTHROPIC");
}
