//! Example posts inserted into an empty collection.

use crate::{Category, PostDraft};

/// (title, category, content, image url)
const SAMPLES: [(&str, Category, &str, &str); 5] = [
    (
        "Getting Started with Web Development",
        Category::Technology,
        "Web development is the work involved in developing a website for the Internet or an intranet. Web development can range from developing a simple single static page of plain text to complex web applications, electronic businesses, and social network services.\n\nFront-end development involves the interface that users interact with. HTML, CSS, and JavaScript are the core technologies for building web pages. Frameworks like React, Angular, and Vue make front-end development faster and more organized.\n\nBack-end development involves the server side, focusing on databases, server logic, and APIs. Common technologies include Node.js, Python, Ruby, PHP, and databases like MySQL and MongoDB.",
        "https://images.unsplash.com/photo-1498050108023-c5249f4df085?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=2072&q=80",
    ),
    (
        "The Art of Mindful Living",
        Category::Lifestyle,
        "Mindfulness is the practice of purposely bringing one's attention to experiences occurring in the present moment without judgment. Mindfulness is a skill that can be developed through practice, often through meditation.\n\nBenefits of mindfulness include reduced stress, improved focus, and better emotional regulation. It can be as simple as taking a few minutes each day to sit quietly and focus on your breath.\n\nMindful living extends beyond formal meditation. It's about bringing awareness to everyday activities like eating, walking, and interacting with others. The goal is to fully engage with the present moment rather than being lost in thoughts about the past or future.",
        "https://images.unsplash.com/photo-1506126613408-eca07ce68773?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=2070&q=80",
    ),
    (
        "Exploring the Hidden Gems of Southeast Asia",
        Category::Travel,
        "Southeast Asia offers a treasure trove of experiences beyond the typical tourist spots. While places like Bali and Bangkok are popular for good reason, venturing off the beaten path reveals authentic cultural experiences and breathtaking natural beauty.\n\nIn Thailand, skip the crowded beaches of Phuket and head to Koh Lanta or Koh Kood for pristine shores without the crowds. Vietnam's Ha Giang loop offers spectacular mountain scenery and glimpses into the lives of ethnic minority groups.\n\nLaos, often overlooked by travelers rushing between Thailand and Vietnam, has the charming UNESCO town of Luang Prabang and the serene 4000 Islands region in the Mekong River. Cambodia has more to offer than just Angkor Wat, including the untouched beaches of Koh Rong and the elephant sanctuaries in Mondulkiri.",
        "https://images.unsplash.com/photo-1528181304800-259b08848526?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=2070&q=80",
    ),
    (
        "The Future of Artificial Intelligence",
        Category::Technology,
        "Artificial Intelligence (AI) is rapidly transforming our world, from virtual assistants to self-driving cars. The technology continues to evolve at an unprecedented pace, raising both exciting possibilities and important questions about our future.\n\nMachine learning, a subset of AI, enables computers to learn from data and improve their performance over time. Deep learning, a more advanced form of machine learning, has revolutionized fields like computer vision and natural language processing.\n\nAs AI becomes more sophisticated, it's crucial to consider its ethical implications and ensure that these powerful technologies are developed and used responsibly. The future of AI holds immense potential for solving complex problems and improving human lives.",
        "https://images.unsplash.com/photo-1677442136019-21780ecad995?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=2070&q=80",
    ),
    (
        "Healthy Eating Habits for Busy Professionals",
        Category::Health,
        "Maintaining healthy eating habits can be challenging for busy professionals, but it's essential for long-term wellbeing. With proper planning and smart choices, you can maintain a nutritious diet even with a hectic schedule.\n\nMeal prepping is a game-changer for busy professionals. Dedicate a few hours on the weekend to prepare healthy meals for the week. Focus on whole foods, lean proteins, and plenty of vegetables.\n\nSmart snacking is another key to success. Keep healthy snacks like nuts, fruits, and yogurt at your desk. Stay hydrated by keeping a water bottle nearby, and consider meal delivery services that offer healthy options when you're too busy to cook.",
        "https://images.unsplash.com/photo-1490645935967-10de6ba17061?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=2070&q=80",
    ),
];

/// Drafts for the sample posts, in insertion order
pub fn sample_posts() -> Vec<PostDraft> {
    SAMPLES
        .iter()
        .map(|(title, category, content, image_url)| {
            PostDraft::new(*title, *category, *content).with_image_url(*image_url)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::validate_image_url;

    #[test]
    fn samples_cover_every_category() {
        let categories: HashSet<Category> = sample_posts().iter().map(|d| d.category).collect();
        assert_eq!(categories.len(), Category::ALL.len());
    }

    #[test]
    fn samples_are_well_formed() {
        for draft in sample_posts() {
            assert!(!draft.title.trim().is_empty());
            assert!(draft.content.contains("\n\n"));
            assert!(validate_image_url(draft.image_url.as_deref().unwrap()).is_ok());
        }
    }
}
