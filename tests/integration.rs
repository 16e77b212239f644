use inkspire::{
    ai::{ImageGenerationService, MockImageGenerationClient},
    gallery::ViewMode,
    generator::TattooGenerator,
    image_ref::ImageRef,
    models::{BodyPlacement, ColorScheme, GenerationRequest, MockupSettings, TattooStyle},
    prompts,
    studio::Studio,
    Error,
};

fn request(subject: &str) -> GenerationRequest {
    GenerationRequest {
        subject: subject.to_string(),
        style: TattooStyle::Japanese,
        color_scheme: ColorScheme::FullColor,
        placement: BodyPlacement::BehindEar,
        placement_detail: Some("left side".to_string()),
        size: "6 cm".to_string(),
        additional_details: None,
    }
}

#[tokio::test]
async fn test_full_workflow_with_mocks() {
    let mock = MockImageGenerationClient::new()
        .with_image_response(ImageRef::new("image/png", "DESIGN"))
        .with_image_response(ImageRef::new("image/jpeg", "MOCKUP"));
    let studio = Studio::new(TattooGenerator::new(Box::new(mock.clone())));

    // Step one: design
    let design = studio
        .generate_design(&request("koi \"Flow\""))
        .await
        .unwrap();
    assert_eq!(design.design.to_data_uri(), "data:image/png;base64,DESIGN");

    let design_call = mock.last_call().unwrap();
    assert!(design_call.reference.is_none());
    assert!(design_call.prompt.contains("\"koi\""));
    assert!(design_call.prompt.contains("\"Flow\""));
    assert!(design_call.prompt.contains("Japanese (Irezumi)"));

    // Step two: mockup with the stored placement
    let with_mockup = studio
        .generate_mockup(&design.id, design.mockup_settings())
        .await
        .unwrap();
    assert_eq!(
        with_mockup.mockup.as_ref().unwrap().to_data_uri(),
        "data:image/jpeg;base64,MOCKUP"
    );
    assert_eq!(studio.view(), ViewMode::Mockup);

    let mockup_call = mock.last_call().unwrap();
    assert_eq!(mockup_call.reference.unwrap().payload(), "DESIGN");
    assert!(mockup_call.prompt.contains("Specific placement: left side"));
    assert!(mockup_call.prompt.contains("cartilage"));

    // Re-render on a different body part replaces the mockup in place
    studio
        .generate_mockup(
            &design.id,
            MockupSettings {
                placement: BodyPlacement::Forearm,
                placement_detail: None,
                size: String::new(),
            },
        )
        .await
        .unwrap();
    let stored = studio.get(&design.id).unwrap();
    assert_eq!(stored.placement, BodyPlacement::Forearm);
    assert_eq!(studio.images().len(), 1);
    let rerender_prompt = mock.last_call().unwrap().prompt;
    assert!(!rerender_prompt.contains("cartilage"));
    assert!(rerender_prompt.contains("15 cm"));

    // Delete clears everything
    studio.delete(&design.id).unwrap();
    assert!(studio.images().is_empty());
    assert!(studio.active().is_none());
    assert_eq!(mock.get_call_count(), 3);
}

#[tokio::test]
async fn test_gallery_is_newest_first() {
    let mock = MockImageGenerationClient::new();
    let studio = Studio::new(TattooGenerator::new(Box::new(mock)));

    let first = studio.generate_design(&request("moon")).await.unwrap();
    let second = studio.generate_design(&request("sun")).await.unwrap();

    let subjects: Vec<_> = studio.images().into_iter().map(|i| i.subject).collect();
    assert_eq!(subjects, vec!["sun", "moon"]);
    assert_eq!(studio.active().unwrap().id, second.id);

    studio.select(&first.id).unwrap();
    assert_eq!(studio.active().unwrap().id, first.id);
}

#[tokio::test]
async fn test_failed_design_leaves_state_untouched() {
    let mock = MockImageGenerationClient::new().with_failure("No image data found");
    let studio = Studio::new(TattooGenerator::new(Box::new(mock)));

    let err = studio.generate_design(&request("crow")).await.unwrap_err();
    assert!(matches!(err, Error::AiProvider(_)));
    assert!(studio.images().is_empty());
    assert!(studio
        .last_error()
        .unwrap()
        .starts_with("Failed to generate the design."));
}

#[tokio::test]
async fn test_mock_is_usable_as_trait_object() {
    let service: Box<dyn ImageGenerationService> = Box::new(MockImageGenerationClient::new());
    let image = service.generate_image("anything", None).await.unwrap();
    assert!(image.to_data_uri().starts_with("data:image/png;base64,"));
}

#[test]
fn test_subject_splitting_examples() {
    let parts = prompts::split_subject("elephant \"Mom\"");
    assert_eq!(parts.visual_subject, "elephant");
    assert!(parts.text_to_inscribe.contains("\"Mom\""));

    let parts = prompts::split_subject("\"Dad\"");
    assert_eq!(parts.visual_subject, prompts::LETTERING_FALLBACK);
    assert!(parts.text_to_inscribe.contains("\"Dad\""));

    let parts = prompts::split_subject("a wolf");
    assert_eq!(parts.text_to_inscribe, prompts::NO_TEXT);
    assert_eq!(parts.visual_subject, "a wolf");
}
