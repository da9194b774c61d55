use tabled::{settings::Style, Table, Tabled};
use crate::model::{Question, User};
use crate::storage::DbStats;

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "First")]
    fname: String,
    #[tabled(rename = "Last")]
    lname: String,
}

#[derive(Tabled)]
struct QuestionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Author")]
    user_id: i64,
}

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Table")]
    table: &'static str,
    #[tabled(rename = "Rows")]
    rows: usize,
}

fn id_cell(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string())
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    if rows.is_empty() {
        return String::new();
    }
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn users_table(users: &[User]) -> String {
    render(
        users
            .iter()
            .map(|u| UserRow {
                id: id_cell(u.id),
                fname: u.fname.clone(),
                lname: u.lname.clone(),
            })
            .collect(),
    )
}

pub fn questions_table(questions: &[Question]) -> String {
    render(
        questions
            .iter()
            .map(|q| QuestionRow {
                id: id_cell(q.id),
                title: q.title.clone(),
                user_id: q.user_id,
            })
            .collect(),
    )
}

pub fn stats_table(stats: &DbStats) -> String {
    render(vec![
        StatRow { table: "users", rows: stats.users },
        StatRow { table: "questions", rows: stats.questions },
        StatRow { table: "replies", rows: stats.replies },
        StatRow { table: "question_followers", rows: stats.followers },
        StatRow { table: "question_likes", rows: stats.likes },
    ])
}
