//! Crate not intended for direct use.
//! Use https://docs.rs/threaded-gen instead.
#![allow(nonstandard_style, unused_imports)]

use ::proc_macro::{
    TokenStream,
};
use ::proc_macro2::{
    Span,
    TokenStream as TokenStream2,
};
use ::quote::{
    quote,
    quote_spanned,
    ToTokens,
};
use ::syn::{*,
    parse::{Parse, Parser, ParseStream},
    Result, // Explicitly shadow it
    spanned::Spanned,
};

/// Turns a `fn` whose body yields with `yield_!` into a function returning a
/// `::threaded_gen::Generator`.
///
/// Accepted forms: `#[generator(yield(T))]` and `#[generator(T)]`.
///
///   - `fn f (args…) { … }`: a cancelled `yield_!` (the generator was
///     dropped) returns from the body.
///
///   - `fn f (args…) -> Result<(), E> { … }`: `yield_!` propagates a
///     cancellation with `?`, so `E : From<YieldError> + Into<BoxError>`;
///     an `Err` returned by the body fails the generator.
#[proc_macro_attribute] pub
fn generator (
    attrs: TokenStream,
    input: TokenStream,
) -> TokenStream
{
    generator_impl(attrs.into(), input.into())
        .unwrap_or_else(|err| {
            let mut errors =
                err .into_iter()
                    .map(|err| Error::new(
                        err.span(),
                        format_args!("`#[threaded_gen::generator]`: {}", err),
                    ))
            ;
            let mut err = errors.next().unwrap();
            errors.for_each(|cur| err.combine(cur));
            err.to_compile_error()
        })
        .into()
}

struct Params {
    yield_type: Type,
}

impl Parse for Params {
    fn parse (input: ParseStream<'_>)
      -> Result<Params>
    {
        let yield_type = if input.peek(Token![yield]) {
            let _: Token![yield] = input.parse()?;
            let contents;
            parenthesized!(contents in input);
            contents.parse()?
        } else {
            input.parse()?
        };
        let _: Option<Token![,]> = input.parse()?;
        Ok(Params { yield_type })
    }
}

fn generator_impl (
    params: TokenStream2,
    input: TokenStream2,
) -> Result<TokenStream2>
{
    let Params { yield_type } = parse2(params)?;

    let mut function: ItemFn = parse2(input)?;
    let ItemFn {
        ref mut attrs,
        ref mut block,
        ref mut sig,
        ..
    } = function;

    if let Some(asyncness) = sig.asyncness {
        return Err(Error::new_spanned(
            asyncness,
            "`async fn`s cannot be generators",
        ));
    }
    if let Some(receiver) = sig.inputs.iter().find(|arg| matches!(arg, FnArg::Receiver(_))) {
        return Err(Error::new_spanned(
            receiver,
            "`self` receivers are not supported yet",
        ));
    }

    let fname = &sig.ident;
    let thread_name = quote!(
        ::core::concat!(
            "generator '",
            ::core::module_path!(),
            "::",
            ::core::stringify!(#fname),
            "'",
        )
    );

    // The original body becomes a closure called right away on the
    // generator's execution context, so that `return` keeps its meaning.
    let body = match ::core::mem::replace(&mut sig.output, ReturnType::Default) {
        | ReturnType::Default => quote!({
            macro_rules! yield_ {(
                $value:expr $(,)?
            ) => (
                if __yielder__.yield_($value).is_err() {
                    return;
                }
            )}

            (move || -> () #block)();
            ::core::result::Result::Ok(())
        }),

        | ReturnType::Type(_, ret) => quote!({
            macro_rules! yield_ {(
                $value:expr $(,)?
            ) => (
                __yielder__.yield_($value)?
            )}

            let ret: #ret = (move || -> #ret #block)();
            ret.map_err(::core::convert::Into::into)
        }),
    };

    sig.output = parse_quote!(
        -> ::threaded_gen::Generator<#yield_type>
    );
    attrs.push(parse_quote!(
        #[allow(clippy::redundant_closure_call)]
    ));
    *block = parse_quote!({
        ::threaded_gen::Builder::new()
            .name(#thread_name)
            .build(move |
                __yielder__: &::threaded_gen::Yielder<#yield_type>,
            | -> ::core::result::Result<(), ::threaded_gen::BoxError>
            #body)
    });

    Ok(function.into_token_stream())
}
