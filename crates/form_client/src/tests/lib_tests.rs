use super::*;
use shared::domain::{Answer, QuestionKind};

fn context() -> AppContext {
    AppContext::new(FormStore::new(), "https://forms.example.com/app").expect("context")
}

fn short(text: &str, required: bool) -> QuestionInput {
    QuestionInput::new(QuestionKind::ShortAnswer, text, required)
}

fn multiple(text: &str, options: &[&str], required: bool) -> QuestionInput {
    QuestionInput::new(
        QuestionKind::MultipleChoice {
            options: options.iter().map(|o| o.to_string()).collect(),
        },
        text,
        required,
    )
}

fn question_id(outcome: DispatchOutcome) -> QuestionId {
    match outcome {
        DispatchOutcome::QuestionAdded(id) => id,
        other => panic!("expected question to be added, got {other:?}"),
    }
}

fn saved_id(outcome: DispatchOutcome) -> FormId {
    match outcome {
        DispatchOutcome::FormSaved { form_id, .. } => form_id,
        other => panic!("expected form to be saved, got {other:?}"),
    }
}

/// Publishes "Team lunch" with a required name, a yes/no and a multiple choice.
fn publish_lunch_form(ctx: &mut AppContext) -> FormId {
    ctx.set_title("Team lunch");
    ctx.add_question(short("  Your name?  ", true)).expect("name");
    ctx.add_question(QuestionInput::new(QuestionKind::YesNo, "Vegetarian?", false))
        .expect("yes/no");
    ctx.add_question(multiple("Which days?", &["Mon", "Tue", "Wed"], true))
        .expect("days");
    saved_id(ctx.save_form().expect("save"))
}

fn validation_error(err: ClientError) -> ValidationError {
    match err {
        ClientError::Validation(err) => err,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn add_question_trims_text_before_dispatch() {
    let mut ctx = context();
    let id = question_id(ctx.add_question(short("  Name?  ", true)).expect("add"));
    let question = ctx.state().current_form().question(id).expect("question");
    assert_eq!(question.text, "Name?");
}

#[test]
fn rejected_question_leaves_draft_untouched() {
    let mut ctx = context();
    let before = ctx.store().snapshot();

    let err = ctx.add_question(short("   ", false)).expect_err("blank text");
    assert_eq!(validation_error(err), ValidationError::MissingQuestionText);

    let err = ctx
        .add_question(multiple("Pick", &["A", " "], false))
        .expect_err("blank option");
    assert_eq!(validation_error(err), ValidationError::BlankOption);

    assert!(std::sync::Arc::ptr_eq(&before, &ctx.store().snapshot()));
}

#[test]
fn editing_question_switches_kind_and_options_together() {
    let mut ctx = context();
    let id = question_id(
        ctx.add_question(multiple("Colour?", &["Red", "Blue"], false))
            .expect("add"),
    );

    let outcome = ctx
        .edit_question(id, short("Favourite colour?", true))
        .expect("edit");

    assert_eq!(outcome, DispatchOutcome::QuestionUpdated(id));
    let question = &ctx.state().current_form().questions[0];
    assert_eq!(question.id, id);
    assert_eq!(question.kind, QuestionKind::ShortAnswer);
    assert!(question.options().is_empty());
    assert!(question.required);
}

#[test]
fn save_requires_title_then_questions() {
    let mut ctx = context();
    let err = ctx.save_form().expect_err("no title");
    assert_eq!(validation_error(err), ValidationError::MissingTitle);

    ctx.set_title("Survey");
    let err = ctx.save_form().expect_err("no questions");
    assert_eq!(validation_error(err), ValidationError::NoQuestions);
    assert!(ctx.state().forms().is_empty());

    ctx.preview().expect("preview only needs a title");
}

#[test]
fn edit_form_round_trip_overwrites_saved_form() {
    let mut ctx = context();
    let form_id = publish_lunch_form(&mut ctx);

    ctx.edit_form(form_id).expect("load");
    assert_eq!(ctx.state().current_form().id, Some(form_id));
    ctx.set_title("Team lunch (Friday)");
    let outcome = ctx.save_form().expect("resave");

    assert_eq!(
        outcome,
        DispatchOutcome::FormSaved {
            form_id,
            created: false
        }
    );
    assert_eq!(ctx.state().forms().len(), 1);
    assert_eq!(ctx.state().forms()[0].title, "Team lunch (Friday)");
}

#[test]
fn edit_form_reports_missing_form() {
    let mut ctx = context();
    let missing = FormId(uuid::Uuid::from_u128(42));
    let err = ctx.edit_form(missing).expect_err("missing");
    let notice = Notice::from(&err);
    assert_eq!(notice.title, "Form Not Found");
    assert_eq!(notice.level, NoticeLevel::Danger);
}

#[test]
fn share_link_round_trips_through_open_shared() {
    let mut ctx = context();
    let form_id = publish_lunch_form(&mut ctx);

    let link = ctx.share_link(form_id).expect("link");
    assert_eq!(
        link.as_str(),
        format!("https://forms.example.com/app/userform/{form_id}")
    );

    let form = ctx.open_shared(link.as_str()).expect("open link");
    assert_eq!(form.id, form_id);
    let form = ctx
        .open_shared(&format!("userform/{form_id}"))
        .expect("open path");
    assert_eq!(form.title, "Team lunch");
}

#[test]
fn open_shared_rejects_deleted_and_malformed_links() {
    let mut ctx = context();
    let form_id = publish_lunch_form(&mut ctx);
    let link = ctx.share_link(form_id).expect("link");
    ctx.delete_form(form_id);

    let err = ctx.open_shared(link.as_str()).expect_err("deleted");
    assert!(matches!(
        err,
        ClientError::Api(ApiException {
            code: ErrorCode::NotFound,
            ..
        })
    ));

    let err = ctx.open_shared("admin/forms").expect_err("malformed");
    assert!(matches!(
        err,
        ClientError::Api(ApiException {
            code: ErrorCode::Validation,
            ..
        })
    ));
}

#[test]
fn submit_response_validates_email_and_required_answers() {
    let mut ctx = context();
    let form_id = publish_lunch_form(&mut ctx);
    let form = ctx.state().form(form_id).expect("form").clone();
    let [name, _vegetarian, days] = [form.questions[0].id, form.questions[1].id, form.questions[2].id];

    let sheet = AnswerSheet::for_form(&form);
    let cases = [
        ("", "", ValidationError::MissingEmail),
        ("not-an-email", "not-an-email", ValidationError::InvalidEmail),
        ("a@example.com", " ", ValidationError::MissingEmailConfirmation),
        ("a@example.com", "b@example.com", ValidationError::EmailMismatch),
    ];
    for (email, confirmation, expected) in cases {
        let err = ctx
            .submit_response(sheet.clone(), email, confirmation)
            .expect_err("invalid email");
        assert_eq!(validation_error(err), expected);
    }

    let mut sheet = AnswerSheet::for_form(&form);
    sheet.set_text(name, "Ada").expect("name");
    let err = ctx
        .submit_response(sheet.clone(), "a@example.com", "a@example.com")
        .expect_err("days missing");
    assert_eq!(
        validation_error(err),
        ValidationError::RequiredAnswerMissing {
            question: "Which days?".into()
        }
    );
    assert!(ctx.state().responses().is_empty());

    sheet.toggle_choice(days, "Tue").expect("tue");
    sheet.toggle_choice(days, "Mon").expect("mon");
    let response_id = ctx
        .submit_response(sheet, "a@example.com", "a@example.com")
        .expect("submit");

    let response = &ctx.state().responses()[0];
    assert_eq!(response.id, response_id);
    assert_eq!(
        response.answers.get(&days),
        Some(&Answer::Choices(vec!["Tue".into(), "Mon".into()]))
    );
    assert_eq!(response.answers.get(&name), Some(&Answer::Text("Ada".into())));
}

#[test]
fn answer_sheet_toggles_and_rejects_mismatched_answers() {
    let mut ctx = context();
    let form_id = publish_lunch_form(&mut ctx);
    let form = ctx.state().form(form_id).expect("form");
    let (name, vegetarian, days) = (form.questions[0].id, form.questions[1].id, form.questions[2].id);
    let mut sheet = AnswerSheet::for_form(form);

    assert_eq!(sheet.answers().get(&name), Some(&Answer::Text(String::new())));
    assert_eq!(sheet.answers().get(&days), Some(&Answer::Choices(Vec::new())));

    sheet.toggle_choice(days, "Mon").expect("select");
    sheet.toggle_choice(days, "Wed").expect("select");
    sheet.toggle_choice(days, "Mon").expect("deselect");
    assert_eq!(sheet.answers().get(&days), Some(&Answer::Choices(vec!["Wed".into()])));

    assert!(matches!(
        sheet.toggle_choice(days, "Sun"),
        Err(ValidationError::AnswerMismatch { .. })
    ));
    assert!(matches!(
        sheet.set_text(vegetarian, "Maybe"),
        Err(ValidationError::AnswerMismatch { .. })
    ));
    assert!(matches!(
        sheet.set_text(days, "Mon"),
        Err(ValidationError::AnswerMismatch { .. })
    ));
    sheet.set_yes_no(vegetarian, true).expect("yes");

    let review = sheet.review();
    assert_eq!(
        review,
        vec![
            ("Your name?".to_string(), "No answer".to_string()),
            ("Vegetarian?".to_string(), "Yes".to_string()),
            ("Which days?".to_string(), "Wed".to_string()),
        ]
    );
}

#[test]
fn delete_form_drops_its_responses_from_stats() {
    let mut ctx = context();
    let lunch = publish_lunch_form(&mut ctx);
    ctx.set_title("Feedback");
    ctx.add_question(short("Comments", false)).expect("question");
    let feedback = saved_id(ctx.save_form().expect("save"));

    for email in ["a@example.com", "b@example.com", "c@example.com"] {
        let form = ctx.state().form(lunch).expect("lunch");
        let mut sheet = AnswerSheet::for_form(form);
        let (name, days) = (form.questions[0].id, form.questions[2].id);
        sheet.set_text(name, email).expect("name");
        sheet.toggle_choice(days, "Mon").expect("day");
        ctx.submit_response(sheet, email, email).expect("submit");
    }

    let stats = ctx.stats();
    assert_eq!(stats.total_forms, 2);
    assert_eq!(stats.total_responses, 3);
    assert_eq!(stats.average_responses_per_form, 1.5);
    assert_eq!(stats.forms[0].response_count, 3);
    assert_eq!(stats.forms[1].response_count, 0);

    let outcome = ctx.delete_form(lunch);
    assert_eq!(
        outcome,
        DispatchOutcome::FormDeleted {
            form_id: lunch,
            responses_removed: 3
        }
    );
    let stats = ctx.stats();
    assert_eq!(stats.total_forms, 1);
    assert_eq!(stats.forms[0].form_id, feedback);
    assert_eq!(stats.total_responses, 0);
    assert_eq!(stats.average_responses_per_form, 0.0);
}

#[test]
fn notices_follow_outcomes() {
    let mut ctx = context();
    ctx.set_title("Survey");
    let added = ctx.add_question(short("Q", false)).expect("add");
    assert_eq!(
        Notice::for_outcome(&added).map(|n| n.message),
        Some("Question added successfully!".to_string())
    );
    let saved = ctx.save_form().expect("save");
    assert_eq!(
        Notice::for_outcome(&saved).map(|n| n.level),
        Some(NoticeLevel::Success)
    );
    assert_eq!(Notice::for_outcome(&ctx.new_form()), None);

    let err = ctx.save_form().expect_err("empty draft");
    let notice = Notice::from(&err);
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert_eq!(notice.title, "Validation Error");
    assert_eq!(notice.message, "Please enter a form title");
}

#[test]
fn rejects_unparseable_share_base() {
    let err = AppContext::new(FormStore::new(), "not a url").err().expect("error");
    assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
}
