//! Guidance shown on the help tab

/// One piece of advice on writing prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tip {
    pub title: &'static str,
    pub text: &'static str,
}

const TIPS: &[Tip] = &[
    Tip {
        title: "Be specific",
        text: "The more precisely you describe the task, the better the result. \
               State the format, length, style and target audience.",
    },
    Tip {
        title: "Set the context",
        text: "Tell the model which role to play: \"You are an experienced marketer\", \
               \"You are a professional programmer\".",
    },
    Tip {
        title: "Use examples",
        text: "Show the desired answer format through examples. \
               This helps the model understand your expectations.",
    },
    Tip {
        title: "Split complex tasks",
        text: "Break large tasks into several simple prompts. This gives a better result.",
    },
    Tip {
        title: "Iterate and refine",
        text: "Don't be afraid to clarify and ask again. \
               Refining a prompt often beats the first attempt.",
    },
];

/// A prompt that follows every tip
pub const EXAMPLE_PROMPT: &str = "You are an experienced copywriter. Write an Instagram post of 150-200 words \
     about healthy eating. Target audience: women aged 25-35 interested in a healthy lifestyle. \
     Tone: friendly and motivating. Add a call to action and 5 relevant hashtags.";

/// Tips in display order
pub fn tips() -> &'static [Tip] {
    TIPS
}
