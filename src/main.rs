use std::sync::Arc;

use dotenv::dotenv;
use personality_quiz::{
    config::Settings, ClassificationResult, QuestionBank, QuizError, QuizSession, RenderedImage,
    ResultRenderer,
};
use teloxide::{
    dispatching::dialogue::{serializer::Json, ErasedStorage, SqliteStorage, Storage},
    prelude::*,
    types::{InputFile, KeyboardButton, KeyboardMarkup, ParseMode},
    utils::html,
};

type QuizDialogue = Dialogue<State, ErasedStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;
type QuizStorage = Arc<ErasedStorage<State>>;

#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
pub enum State {
    #[default]
    Start,
    Quiz {
        session: QuizSession,
    },
}

#[tokio::main]
async fn main() -> HandlerResult {
    let env_file = dotenv();
    pretty_env_logger::init();
    if let Err(e) = env_file {
        log::debug!("No .env file loaded: {}", e);
    }
    log::info!("Starting personality quiz bot...");

    let settings = Settings::from_env();
    let bank = Arc::new(settings.question_bank()?);
    log::info!("Question bank ready: {} questions", bank.size());

    let renderer = Arc::new(ResultRenderer::with_fonts(&settings.font_candidates));
    log::info!("Result images use the {} font", renderer.font_name());

    let bot = Bot::from_env();

    log::info!("Opening dialogue storage at {}", settings.db_path);
    let storage: QuizStorage = SqliteStorage::open(&settings.db_path, Json).await?.erase();

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, ErasedStorage<State>, State>()
            .branch(dptree::case![State::Start].endpoint(start))
            .branch(dptree::case![State::Quiz { session }].endpoint(quiz)),
    )
    .dependencies(dptree::deps![storage, bank, renderer])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;

    Ok(())
}

const GREETING_TEXT: &str = "🤔 Introvert or Extrovert Quiz\n\nAnswer these questions to discover where you fall on the introvert-extrovert spectrum!";
const START_OVER: &str = "Start Over";
const CHOOSE_AN_OPTION: &str = "Please choose one of the options below";
const QUIZ_CHANGED: &str = "The quiz has changed since your last visit, starting over!";

async fn start(
    bot: Bot,
    dialogue: QuizDialogue,
    msg: Message,
    bank: Arc<QuestionBank>,
) -> HandlerResult {
    bot.send_message(msg.chat.id, GREETING_TEXT).await?;

    let session = QuizSession::new();
    ask_question(&bot, msg.chat.id, &bank, &session).await?;

    dialogue.update(State::Quiz { session }).await?;
    Ok(())
}

async fn quiz(
    bot: Bot,
    dialogue: QuizDialogue,
    msg: Message,
    session: QuizSession,
    bank: Arc<QuestionBank>,
    renderer: Arc<ResultRenderer>,
) -> HandlerResult {
    let mut session = session;

    let Some(text) = msg.text() else {
        bot.send_message(msg.chat.id, CHOOSE_AN_OPTION).await?;
        return Ok(());
    };

    if text == START_OVER || text == "/start" {
        session.reset();
        bot.send_message(msg.chat.id, "Starting over!").await?;
        ask_question(&bot, msg.chat.id, &bank, &session).await?;
        dialogue.update(State::Quiz { session }).await?;
        return Ok(());
    }

    // A session stored before the bank changed cannot be resumed
    if session.reconcile(&bank) {
        bot.send_message(msg.chat.id, QUIZ_CHANGED).await?;
        ask_question(&bot, msg.chat.id, &bank, &session).await?;
        dialogue.update(State::Quiz { session }).await?;
        return Ok(());
    }

    if session.is_completed() {
        send_result(&bot, msg.chat.id, &session.result(&bank)?, &renderer).await?;
        return Ok(());
    }

    // Either the button label or the option number
    let question = session.current_question(&bank)?;
    let selection = question.option_index(text).or_else(|| {
        text.trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
    });
    let Some(option) = selection else {
        bot.send_message(msg.chat.id, CHOOSE_AN_OPTION).await?;
        return Ok(());
    };

    match session.submit_answer(&bank, option) {
        Ok(()) => {}
        Err(QuizError::InvalidSelection { .. }) => {
            bot.send_message(msg.chat.id, CHOOSE_AN_OPTION).await?;
            ask_question(&bot, msg.chat.id, &bank, &session).await?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    if session.is_completed() {
        let result = session.result(&bank)?;
        log::info!("Chat {} finished the quiz: {}", msg.chat.id.0, result.category);
        send_result(&bot, msg.chat.id, &result, &renderer).await?;
    } else {
        ask_question(&bot, msg.chat.id, &bank, &session).await?;
    }

    dialogue.update(State::Quiz { session }).await?;
    Ok(())
}

async fn ask_question(
    bot: &Bot,
    chat_id: ChatId,
    bank: &QuestionBank,
    session: &QuizSession,
) -> HandlerResult {
    let question = session.current_question(bank)?;

    let mut rows: Vec<Vec<KeyboardButton>> = question
        .options
        .iter()
        .map(|o| vec![KeyboardButton::new(o.label.clone())])
        .collect();
    rows.push(vec![KeyboardButton::new(START_OVER)]);

    let text = format!(
        "<b>Question {}</b> of {}\n{}\n\nChoose your answer:",
        session.current_index() + 1,
        bank.size(),
        html::escape(&question.prompt)
    );
    bot.send_message(chat_id, text)
        .parse_mode(ParseMode::Html)
        .reply_markup(KeyboardMarkup::new(rows))
        .await?;
    Ok(())
}

async fn send_result(
    bot: &Bot,
    chat_id: ChatId,
    result: &ClassificationResult,
    renderer: &ResultRenderer,
) -> HandlerResult {
    let gauge = renderer.build_gauge(result);
    let text = format!(
        "🎉 <b>Your Results!</b>\n\n<b>{}</b>\n\n{}\n<code>{}</code>\n\n{}",
        result.headline(),
        gauge.title,
        gauge.to_text(20),
        result.category.description()
    );
    bot.send_message(chat_id, text)
        .parse_mode(ParseMode::Html)
        .reply_markup(KeyboardMarkup::new(vec![vec![KeyboardButton::new(
            START_OVER,
        )]]))
        .await?;

    // Image failures are only logged, the text result is already out
    match renderer.render_image(result) {
        Ok(image) => {
            bot.send_document(
                chat_id,
                InputFile::memory(image.bytes).file_name(RenderedImage::FILE_NAME),
            )
            .caption("Download Your Result")
            .await?;
        }
        Err(e) => log::error!("Failed to render result image for chat {}: {}", chat_id.0, e),
    }
    Ok(())
}
