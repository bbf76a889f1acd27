use criterion::{black_box, criterion_group, criterion_main, Criterion};

use studynotes_core::model::{Answer, QuizQuestion};
use studynotes_core::quiz::{answers_from_positions, calculate_quiz_result, Quiz};

fn make_questions(n: u32) -> Vec<QuizQuestion> {
    (1..=n)
        .map(|id| QuizQuestion {
            id,
            question: format!("Question {id}"),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_answer: (id % 4) as usize,
            explanation: String::new(),
        })
        .collect()
}

fn bench_calculate(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculate_quiz_result");

    for n in [10u32, 30, 100] {
        let questions = make_questions(n);
        let positions: Vec<usize> = (0..n as usize).map(|i| i % 4).collect();
        let answers = answers_from_positions(&questions, &positions);
        group.bench_function(format!("n={n}"), |b| {
            b.iter(|| calculate_quiz_result(black_box(&answers), black_box(&questions)))
        });
    }

    group.finish();
}

fn bench_review(c: &mut Criterion) {
    let quiz = Quiz::new("bench", "Bench", make_questions(30)).unwrap();
    let answers: Vec<Answer> = quiz
        .questions()
        .iter()
        .map(|q| Answer::new(q.id, q.correct_answer))
        .collect();

    c.bench_function("review/n=30", |b| {
        b.iter(|| quiz.review(black_box(&answers)))
    });
}

criterion_group!(benches, bench_calculate, bench_review);
criterion_main!(benches);
