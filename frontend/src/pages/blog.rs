use yew::prelude::*;

use crate::components::fab::Fab;
use crate::components::notification::use_notifier;
use crate::components::header::{Header, NavLink};
use crate::content::{catalog, Article};
use crate::error::isolate;
use crate::forms::NewsletterForm;
use crate::interactions::{card_hover, event_element, spawn_ripple, HoverHandlers, HoverTarget};
use crate::reveal::use_reveal_on_scroll;
use crate::scroll_effects::use_scroll_effects;
use crate::search::{filter_articles, SearchContext};

const BLOG_LINKS: &[NavLink] = &[
    NavLink { section_id: "featured", label: "Featured" },
    NavLink { section_id: "latest", label: "Latest" },
    NavLink { section_id: "topics", label: "Topics" },
    NavLink { section_id: "newsletter", label: "Newsletter" },
];

/// Handlers shared by featured and regular cards: hover lift, glow and a
/// ripple on click.
#[derive(Clone)]
struct CardEvents {
    enter: Callback<MouseEvent>,
    leave: Callback<MouseEvent>,
    down: Callback<MouseEvent>,
    up: Callback<MouseEvent>,
    click: Callback<MouseEvent>,
}

impl CardEvents {
    fn new(target: HoverTarget) -> Self {
        let hover = HoverHandlers::new(target);
        let glow = move |entering: bool, lift: Callback<MouseEvent>| {
            Callback::from(move |e: MouseEvent| {
                lift.emit(e.clone());
                if let Some(card) = event_element(&e, target.selector()) {
                    card_hover(&card, entering);
                }
            })
        };
        Self {
            enter: glow(true, hover.enter),
            leave: glow(false, hover.leave),
            down: hover.down,
            up: hover.up,
            click: Callback::from(move |e: MouseEvent| {
                if let Some(card) = event_element(&e, target.selector()) {
                    isolate("card ripple", spawn_ripple(&e, &card));
                }
            }),
        }
    }
}

fn tags(article: &Article) -> Html {
    html! {
        <div class="article__tags">
            { for article.tags.iter().map(|tag| html! { <span class="tag">{tag.clone()}</span> }) }
        </div>
    }
}

fn byline(article: &Article) -> Html {
    html! {
        <div class="article__meta">
            <div class="author">
                <span class="author__avatar">{article.author_initials()}</span>
                <span class="author__name">{article.author.clone()}</span>
            </div>
            <span class="article__date">{article.display_date()}</span>
            <span class="article__read-time">{format!("{} min read", article.read_minutes)}</span>
        </div>
    }
}

fn featured_card(article: &Article, hidden: bool, events: &CardEvents) -> Html {
    html! {
        <article
            key={article.slug.clone()}
            class={classes!("featured-article", hidden.then(|| "search-hidden"))}
            onmouseenter={events.enter.clone()}
            onmouseleave={events.leave.clone()}
            onmousedown={events.down.clone()}
            onmouseup={events.up.clone()}
            onclick={events.click.clone()}
        >
            <span class="article__category">{article.category.clone()}</span>
            <h2 class="article__title">{article.title.clone()}</h2>
            <p class="article__excerpt">{article.excerpt.clone()}</p>
            { tags(article) }
            { byline(article) }
        </article>
    }
}

fn article_card(article: &Article, hidden: bool, events: &CardEvents) -> Html {
    html! {
        <article
            key={article.slug.clone()}
            class={classes!("article-card", hidden.then(|| "search-hidden"))}
            onmouseenter={events.enter.clone()}
            onmouseleave={events.leave.clone()}
            onmousedown={events.down.clone()}
            onmouseup={events.up.clone()}
            onclick={events.click.clone()}
        >
            <span class="article__category">{article.category.clone()}</span>
            <h3 class="article__title">{article.title.clone()}</h3>
            <p class="article__excerpt">{article.excerpt.clone()}</p>
            { tags(article) }
            { byline(article) }
        </article>
    }
}

fn topics(articles: &[Article]) -> Vec<String> {
    let mut topics: Vec<String> = articles.iter().map(|a| a.category.clone()).collect();
    topics.sort();
    topics.dedup();
    topics
}

#[function_component(Blog)]
pub fn blog() -> Html {
    let articles = use_memo(|_| catalog(), ());
    let query = use_context::<SearchContext>()
        .map(|c| c.query)
        .unwrap_or_default();
    let outcome = {
        let articles = articles.clone();
        use_memo(move |query| filter_articles(query, &articles), query.clone())
    };
    let visible = articles.len() - outcome.hidden.len();
    // Bumped per committed query: hiding cards moves every later section.
    let layout_generation = {
        let counter = use_mut_ref(|| 0usize);
        use_memo(
            move |_| {
                *counter.borrow_mut() += 1;
                *counter.borrow()
            },
            query.clone(),
        )
    };

    let notifier = use_notifier();
    use_effect_with_deps(
        move |(no_results, query)| {
            if *no_results {
                if let Some(n) = &notifier {
                    n.info(format!("No articles match \"{}\".", query));
                }
            }
            || ()
        },
        (outcome.show_no_results, query),
    );

    use_scroll_effects(*layout_generation);
    use_reveal_on_scroll(visible);

    let featured_events = CardEvents::new(HoverTarget::FeaturedArticle);
    let card_events = CardEvents::new(HoverTarget::ArticleCard);
    let chip = HoverHandlers::new(HoverTarget::Chip);

    let featured = articles.iter().find(|a| a.featured);
    let rest: Vec<&Article> = articles.iter().filter(|a| !a.featured).collect();

    html! {
        <div class="page page--blog">
            <Header links={BLOG_LINKS.to_vec()} show_search={true} />
            <main class="blog">
                <section id="featured" class="section">
                    <div class="section__header">
                        <h2>{"Featured"}</h2>
                    </div>
                    {
                        match featured {
                            Some(article) => featured_card(article, outcome.hidden.contains(&article.slug), &featured_events),
                            None => html! {},
                        }
                    }
                </section>

                <section id="latest" class="section">
                    <div class="section__header">
                        <h2>{"Latest essays"}</h2>
                    </div>
                    <div class="article-grid">
                        { for rest.iter().map(|a| article_card(a, outcome.hidden.contains(&a.slug), &card_events)) }
                    </div>
                    if outcome.show_no_results {
                        <div class="no-results">
                            <h3>{"No articles found"}</h3>
                            <p>{"Try a different search term."}</p>
                        </div>
                    }
                </section>

                // Tracked sections stack; nothing here sits beside another section.
                <section id="topics" class="section">
                    <div class="section__header">
                        <h2>{"Topics"}</h2>
                    </div>
                    <div class="widget topic-list">
                        { for topics(&articles).into_iter().map(|topic| html! {
                            <a class="topic-tag" href="#latest"
                                onmouseenter={chip.enter.clone()} onmouseleave={chip.leave.clone()}>
                                {topic}
                            </a>
                        }) }
                    </div>
                </section>

                <section id="newsletter" class="section">
                    <div class="section__header">
                        <h2>{"The fortnightly letter"}</h2>
                    </div>
                    <div class="widget newsletter-widget">
                        <p>{"New essays in your inbox, twice a month. Nothing else."}</p>
                        <NewsletterForm />
                    </div>
                </section>
            </main>
            <Fab />
            <style>
                {r#"
                .blog {
                    max-width: 1200px;
                    margin: 0 auto;
                    padding: 120px 24px 80px;
                }
                .newsletter-widget {
                    max-width: 560px;
                }
                .featured-article, .article-card {
                    position: relative;
                    background: var(--color-surface);
                    border: 1px solid var(--color-border);
                    border-radius: var(--radius-lg);
                    padding: 28px;
                    cursor: pointer;
                    transition: transform 0.3s ease, box-shadow 0.3s ease;
                }
                .featured-article .article__title {
                    font-size: 2rem;
                }
                .article-grid {
                    display: grid;
                    grid-template-columns: repeat(auto-fill, minmax(280px, 1fr));
                    gap: 24px;
                }
                .search-hidden {
                    display: none;
                }
                .article__category {
                    font-size: 0.8rem;
                    text-transform: uppercase;
                    letter-spacing: 0.08em;
                    color: var(--color-primary);
                }
                .article__excerpt {
                    color: var(--color-text-secondary);
                }
                .article__tags {
                    display: flex;
                    flex-wrap: wrap;
                    gap: 8px;
                    margin: 12px 0;
                }
                .tag, .topic-tag {
                    display: inline-block;
                    padding: 4px 10px;
                    border-radius: 999px;
                    background: var(--color-secondary);
                    color: var(--color-text);
                    font-size: 0.8rem;
                    text-decoration: none;
                    transition: transform 0.2s ease;
                }
                .article__meta {
                    display: flex;
                    align-items: center;
                    gap: 16px;
                    font-size: 0.85rem;
                    color: var(--color-text-secondary);
                }
                .author {
                    display: flex;
                    align-items: center;
                    gap: 8px;
                }
                .author__avatar {
                    display: inline-flex;
                    align-items: center;
                    justify-content: center;
                    width: 32px;
                    height: 32px;
                    border-radius: 50%;
                    background: var(--color-primary);
                    color: var(--color-btn-primary-text);
                    font-weight: 600;
                    transition: transform 0.3s ease;
                }
                .topic-list {
                    display: flex;
                    flex-wrap: wrap;
                    gap: 8px;
                }
                .no-results {
                    text-align: center;
                    padding: 48px 0;
                    color: var(--color-text-secondary);
                }
                .newsletter-form {
                    display: flex;
                    flex-direction: column;
                    gap: 12px;
                }
                "#}
            </style>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn article(slug: &str, category: &str) -> Article {
        Article {
            slug: slug.into(),
            title: slug.into(),
            excerpt: String::new(),
            author: "Ada Byron".into(),
            category: category.into(),
            tags: vec![],
            published: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            read_minutes: 4,
            featured: false,
        }
    }

    #[test]
    fn topics_are_sorted_and_unique() {
        let articles = vec![article("a", "Design"), article("b", "Craft"), article("c", "Design")];
        assert_eq!(topics(&articles), vec!["Craft".to_string(), "Design".to_string()]);
    }
}
