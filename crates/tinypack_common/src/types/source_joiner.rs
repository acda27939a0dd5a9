use super::source::Source;

/// Concatenates sources with a `\n` between each pair.
#[derive(Default)]
pub struct SourceJoiner<'source> {
  inner: Vec<Box<dyn Source + Send + 'source>>,
}

impl<'source> SourceJoiner<'source> {
  pub fn append_source<T: Source + Send + 'source>(&mut self, source: T) {
    self.inner.push(Box::new(source));
  }

  pub fn join(&self) -> String {
    let sources_len = self.inner.len();
    if sources_len == 0 {
      return String::new();
    }
    let sources_iter = self.inner.iter().enumerate();

    let size_hint_of_ret_source = sources_iter.clone().map(|(_idx, source)| source.content().len()).sum::<usize>()
        + /* Each source we will emit a '\n' but exclude last one */ (sources_len - /* Exclude the last source  */ 1);
    let mut ret_source = String::with_capacity(size_hint_of_ret_source);

    for (index, source) in sources_iter {
      ret_source.push_str(source.content());
      if index < sources_len - 1 {
        ret_source.push('\n');
      }
    }

    ret_source
  }
}

#[test]
fn join_sources() {
  let mut joiner = SourceJoiner::default();
  assert_eq!(joiner.join(), "");

  joiner.append_source("a");
  assert_eq!(joiner.join(), "a");

  joiner.append_source("b");
  joiner.append_source(String::from("c"));
  assert_eq!(joiner.join(), "a\nb\nc");
}
