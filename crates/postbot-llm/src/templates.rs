//! Prompt templates for every model call the bot makes.
//!
//! Each builder returns a ready [`Prompt`]; the caller only chooses the model.

use postbot_core::{NewsItem, TermKind};

use crate::prompt::{ChatMessage, Prompt};

/// Maximum tweet length the prompts ask the model to respect.
const TWEET_LIMIT: usize = 280;

/// Render titles as a JSON-style string array.
fn render_titles(titles: &[String]) -> String {
    let quoted: Vec<String> = titles
        .iter()
        .map(|t| format!("\"{}\"", t.replace('\\', "\\\\").replace('"', "\\\"")))
        .collect();
    format!("[{}]", quoted.join(", "))
}

/// Ask which of `titles` matter to an audience interested in `topics`.
///
/// The reply is a list of booleans, one per title, parsed by
/// [`crate::parse_relevance`].
#[must_use]
pub fn relevance_prompt(model: &str, titles: &[String], topics: &[String]) -> Prompt {
    let instructions = format!(
        "Please review the given list of news titles. Determine their relevance to an \
         audience keen on the following themes: [{}]. Provide a list of boolean values \
         (true or false) corresponding to each title's relevance, in the same order, \
         and nothing else.",
        topics.join(", ")
    );

    let examples = vec![
        ChatMessage::user(
            r#"["new LLM model from Nvidia", "Apples iPhone 15 Event Likely to Be Held on Sept 17", "Release of b2 Game", "XGBoost 3.0 improves Decision Forest Algorithms", "New Zelda Game Now Available"]"#,
        ),
        ChatMessage::assistant("[true, true, false, true, false]"),
        ChatMessage::user(
            r#"["Giant giraffes found in Africa", "We tested the AMD Ryzen 8", "LLM news: Rumors about OpenAI ChatGPT-5", "Donald Trump to make a come back", "Apple may be testing an M3 Mac Mini"]"#,
        ),
        ChatMessage::assistant("[false, true, true, false, true]"),
        ChatMessage::user(
            r#"["War in Ukraine continues", "Microsoft announces new analytics suite", "Scikit-learn updates its API", "Toyota launches new car model", "Alberta AG launches Virtual Assistant"]"#,
        ),
        ChatMessage::assistant("[false, true, true, false, true]"),
        ChatMessage::user(
            r#"["Google bard with an upgrade", "Boston dynamics presents atlas robot", "Bosch invests into AI capabilities", "How to evaluate the performance of a neural network", "Amazon Sagemaker with new features", "Meta to release new LLAMA 2 model"]"#,
        ),
        ChatMessage::assistant("[true, true, true, true, true, true]"),
    ];

    Prompt {
        instructions,
        task: render_titles(titles),
        examples,
        model: model.to_owned(),
        temperature: 0.0,
        max_tokens: 400,
    }
}

/// Ask how much `title` overlaps with recently posted titles.
///
/// The reply is a single integer from 0 (novel) to 5 (complete overlap),
/// parsed by [`crate::parse_novelty_score`].
#[must_use]
pub fn novelty_prompt(model: &str, title: &str, previous: &[String]) -> Prompt {
    let instructions = "Assess the level of novelty in a given list of articles. You will \
        compare a news title with a list of previous news and score the novelty of the \
        article on a scale of 0 to 5, where 5 indicates a complete overlap and 0 signifies \
        a novel topic. Answer with the number only."
        .to_owned();

    let examples = vec![
        ChatMessage::user(
            "'Nvidia launches new AI model.'\nPrevious News: [new AI model available from Nvidia, We Exploded the AMD Ryzen 7 7800X3D, The Lara Croft Collection For Switch Has Been Rated By The ESRB]",
        ),
        ChatMessage::assistant("5"),
        ChatMessage::user(
            "'Big Explosion of an AMD Ryzen 7.'\nPrevious News: [Improving Mental Wellbeing Through Physical Activity, The Lara Croft Collection For Switch Has Been Rated By The ESRB]",
        ),
        ChatMessage::assistant("0"),
        ChatMessage::user(
            "'new AI model available from Google.'\nPrevious News: [new AI model available from Nvidia, The Lara Croft Collection For Switch Has Been Rated By The ESRB]",
        ),
        ChatMessage::assistant("2"),
        ChatMessage::user(
            "'What Really Made Geoffrey Hinton Into an AI Doomer - WIRED.'\nPrevious News: [Why AI's 'godfather' Geoffrey Hinton quit Google, new AI model available from Nvidia, The Lara Croft Collection For Switch Has Been Rated By The ESRB]",
        ),
        ChatMessage::assistant("4"),
    ];

    Prompt {
        instructions,
        task: format!("'{title}.'\nPrevious News: [{}]", previous.join(", ")),
        examples,
        model: model.to_owned(),
        temperature: 0.5,
        max_tokens: 400,
    }
}

/// Ask for an informative tweet announcing a news story.
#[must_use]
pub fn news_tweet_prompt(model: &str, item: &NewsItem) -> Prompt {
    let instructions = format!(
        "You are a twitter user that creates tweets with a maximum length of {TWEET_LIMIT} characters."
    );
    let task = format!(
        "Create an informative tweet on twitter based on the following news title and \
         description. The tweet must use a maximum of {TWEET_LIMIT} characters. Include the \
         {url}. But do not include any other urls. Title: {title}. Description: {description}. \
         Use hashtags to reach a wider audience. Do not include any emojis in the tweet.",
        url = item.url,
        title = item.title,
        description = item.description,
    );

    Prompt {
        instructions,
        task,
        examples: Vec::new(),
        model: model.to_owned(),
        temperature: 0.5,
        max_tokens: 300,
    }
}

/// Ask for the next term (or quote) continuing `previous`, avoiding repeats.
#[must_use]
pub fn term_prompt(model: &str, kind: TermKind, previous: &[String]) -> Prompt {
    let (instructions, task, examples) = match kind {
        TermKind::Fact => (
            "Your job is to continue a given list and return a related term that is not in \
             the list. Return the term only.",
            previous.join(", "),
            vec![
                ChatMessage::user(
                    "machine learning, gradient descent, neural network, hyperparameter tuning",
                ),
                ChatMessage::assistant("'deep learning'"),
                ChatMessage::user(
                    "gradient descent, neural network, hyperparameter tuning, deep learning",
                ),
                ChatMessage::assistant("'prompt engineering'"),
                ChatMessage::user(
                    "neural network, hyperparameter tuning, deep learning, prompt engineering",
                ),
                ChatMessage::assistant("'supervised learning'"),
            ],
        ),
        TermKind::Stoic => (
            "Your job is to continue a given list of stoic quotes and return another stoic \
             quote in the same format that is not in the list. Return the quote only.",
            previous.join("\n"),
            Vec::new(),
        ),
    };

    Prompt {
        instructions: instructions.to_owned(),
        task,
        examples,
        model: model.to_owned(),
        temperature: 1.0,
        max_tokens: 300,
    }
}

/// Ask for a tweet built around one term or quote.
#[must_use]
pub fn term_tweet_prompt(model: &str, kind: TermKind, term: &str) -> Prompt {
    let (instructions, examples) = match kind {
        TermKind::Fact => (
            format!(
                "You are a twitter user that creates tweets with a length below {TWEET_LIMIT} \
                 characters with the intention to inspire, entertain and/or inform people. \
                 Create a twitter tweet that describes the term. Just return the tweet."
            ),
            vec![
                ChatMessage::user("GradientDescent"),
                ChatMessage::assistant(
                    "#GradientDescent is a popular optimization algorithm used to minimize the error of a model by adjusting its parameters. It works by iteratively calculating the gradient of the error with respect to the parameters and updating them accordingly. #ML",
                ),
                ChatMessage::user("Deep Learning"),
                ChatMessage::assistant(
                    "#DeepLearning is a subset of machine learning that uses artificial neural networks with multiple layers to learn and extract complex patterns from data. It has revolutionized computer vision, natural language processing, and speech recognition. #AI",
                ),
            ],
        ),
        TermKind::Stoic => (
            format!(
                "You run a twitter account about stoic quotes with a length below \
                 {TWEET_LIMIT} characters. Create a tweet about the following stoic quote and \
                 just return the tweet."
            ),
            vec![
                ChatMessage::user(
                    "'The best revenge is to be unlike him who performed the injustice.' - Marcus Aurelius",
                ),
                ChatMessage::assistant(
                    "'The best revenge is to be unlike him who performed the injustice.' - Marcus Aurelius. Let's cultivate kindness and rise above negativity, embracing the #Stoic path towards a peaceful mind. #MarcusAurelius #StoicQuotes #Stoicism",
                ),
                ChatMessage::user(
                    "'We cannot choose our external circumstances, but we can always choose how we respond to them.' - Epictetus",
                ),
                ChatMessage::assistant(
                    "'We cannot choose our external circumstances, but we can always choose how we respond to them.' - Epictetus. It's our reactions that define our journey. #StoicQuotes #Stoicism #Epictetus #Mindfulness",
                ),
            ],
        ),
    };

    Prompt {
        instructions,
        task: term.to_owned(),
        examples,
        model: model.to_owned(),
        temperature: 1.0,
        max_tokens: 300,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relevance_task_lists_every_title_in_order() {
        let titles = vec!["First".to_string(), "Second \"quoted\"".to_string()];
        let prompt = relevance_prompt("m", &titles, &["ai".to_string()]);
        assert_eq!(prompt.task, r#"["First", "Second \"quoted\""]"#);
        assert!(prompt.instructions.contains("[ai]"));
        assert!(prompt.temperature.abs() < f32::EPSILON);
        assert_eq!(prompt.examples.len(), 8);
    }

    #[test]
    fn novelty_task_includes_previous_titles() {
        let prompt = novelty_prompt(
            "gpt-4",
            "Apple ships M4",
            &["Nvidia earnings".to_string(), "Rust 2.0".to_string()],
        );
        assert_eq!(
            prompt.task,
            "'Apple ships M4.'\nPrevious News: [Nvidia earnings, Rust 2.0]"
        );
        assert_eq!(prompt.model, "gpt-4");
    }

    #[test]
    fn news_tweet_task_mentions_url_and_description() {
        let item = NewsItem {
            title: "Title".to_string(),
            description: "Desc".to_string(),
            url: "https://example.com/a".to_string(),
        };
        let prompt = news_tweet_prompt("m", &item);
        assert!(prompt.task.contains("https://example.com/a"));
        assert!(prompt.task.contains("Description: Desc."));
        assert!(prompt.examples.is_empty());
    }

    #[test]
    fn fact_term_prompt_joins_with_commas() {
        let prompt = term_prompt(
            "m",
            TermKind::Fact,
            &["bagging".to_string(), "boosting".to_string()],
        );
        assert_eq!(prompt.task, "bagging, boosting");
        assert_eq!(prompt.examples.len(), 6);
    }

    #[test]
    fn stoic_term_prompt_has_no_examples_and_joins_lines() {
        let prompt = term_prompt("m", TermKind::Stoic, &["a".to_string(), "b".to_string()]);
        assert_eq!(prompt.task, "a\nb");
        assert!(prompt.examples.is_empty());
    }

    #[test]
    fn term_tweet_prompt_uses_term_as_task() {
        let prompt = term_tweet_prompt("m", TermKind::Stoic, "'Amor fati' - Nietzsche");
        assert_eq!(prompt.task, "'Amor fati' - Nietzsche");
        assert!(prompt.instructions.contains("stoic"));
    }
}
