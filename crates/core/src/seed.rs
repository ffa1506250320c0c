//! Sample content a fresh session starts with.

use crate::forum::{Comment, Post, PostId};

/// Greeting shown as the first assistant message of a new transcript.
pub const GREETING: &str = "Hello! I'm your healthcare assistant. How can I help you today?";

const ALICE: &str = "https://randomuser.me/api/portraits/women/1.jpg";
const BOB: &str = "https://randomuser.me/api/portraits/men/4.jpg";
const BOB_ALT: &str = "https://randomuser.me/api/portraits/men/2.jpg";
const CHARLIE: &str = "https://randomuser.me/api/portraits/men/5.jpg";
const CHARLIE_ALT: &str = "https://randomuser.me/api/portraits/men/3.jpg";

fn comment(author: &str, avatar: &str, text: &str) -> Comment {
    Comment {
        author: author.into(),
        avatar: avatar.into(),
        text: text.into(),
    }
}

fn post(
    author: &str,
    avatar: &str,
    created: &str,
    content: &str,
    likes: u64,
    comments: [Comment; 2],
) -> Post {
    Post {
        id: PostId::generate(),
        author: author.into(),
        avatar: avatar.into(),
        created: created.into(),
        content: content.into(),
        likes,
        comments: comments.into(),
    }
}

/// The sample discussion threads, in display order.
pub fn posts() -> Vec<Post> {
    vec![
        post(
            "Alice",
            ALICE,
            "2 hours ago",
            "Has anyone experienced joint pain along with fever? I'm really worried it might be something serious.",
            12,
            [
                comment(
                    "Bob",
                    BOB_ALT,
                    "That sounds like it could be an autoimmune issue. Have you seen a doctor?",
                ),
                comment(
                    "Charlie",
                    CHARLIE_ALT,
                    "Could be the flu, but I'd get it checked out just in case.",
                ),
            ],
        ),
        post(
            "Bob",
            BOB,
            "4 hours ago",
            "I've been feeling fatigued for weeks now. My doctor ran tests, but they couldn't pinpoint the cause. Any advice?",
            8,
            [
                comment(
                    "Alice",
                    ALICE,
                    "Fatigue can be linked to stress or even poor diet. Have you tried changing your routine?",
                ),
                comment(
                    "Charlie",
                    CHARLIE,
                    "You might want to consider seeing a specialist or getting a second opinion.",
                ),
            ],
        ),
        post(
            "Charlie",
            CHARLIE,
            "1 day ago",
            "Has anyone dealt with persistent headaches? I've tried over-the-counter meds, but nothing seems to work.",
            5,
            [
                comment(
                    "Alice",
                    ALICE,
                    "I had similar issues. I was prescribed a migraine medication, and it really helped.",
                ),
                comment(
                    "Bob",
                    BOB,
                    "Have you tried keeping a headache journal? It could help identify triggers.",
                ),
            ],
        ),
        post(
            "Alice",
            ALICE,
            "3 days ago",
            "I've been struggling with anxiety lately. I know exercise is good, but I feel too overwhelmed to start.",
            15,
            [
                comment(
                    "Bob",
                    BOB_ALT,
                    "Starting small with a 10-minute walk could help ease the pressure. Baby steps!",
                ),
                comment(
                    "Charlie",
                    CHARLIE,
                    "Yoga and mindfulness also helped me when I felt anxious.",
                ),
            ],
        ),
        post(
            "Bob",
            BOB,
            "5 days ago",
            "Does anyone know how to manage asthma symptoms during cold weather? I'm really struggling this winter.",
            9,
            [
                comment(
                    "Alice",
                    ALICE,
                    "Make sure to use your inhaler regularly and wear a scarf over your mouth to warm up the air.",
                ),
                comment(
                    "Charlie",
                    CHARLIE,
                    "You should also avoid cold, dry air as much as possible and stay indoors when you can.",
                ),
            ],
        ),
        post(
            "Charlie",
            CHARLIE,
            "1 week ago",
            "Has anyone been on a gluten-free diet for a while? How did you adjust to it and feel? I've been considering it.",
            7,
            [
                comment(
                    "Alice",
                    ALICE,
                    "It took a while for me to get used to it, but my digestive issues improved.",
                ),
                comment(
                    "Bob",
                    BOB,
                    "Gluten-free can be tough, but it definitely helps with inflammation if you're sensitive.",
                ),
            ],
        ),
        post(
            "Alice",
            ALICE,
            "1 week ago",
            "I've been having trouble sleeping lately. Any tips for getting better sleep without relying on medication?",
            10,
            [
                comment(
                    "Bob",
                    BOB_ALT,
                    "Try limiting screen time before bed and establish a consistent routine. It helps a lot.",
                ),
                comment(
                    "Charlie",
                    CHARLIE,
                    "I also found drinking chamomile tea before bed really soothing.",
                ),
            ],
        ),
    ]
}
